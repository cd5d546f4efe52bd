use std::sync::Arc;

use anyhow::Result;

use crate::mailer::NotificationGateway;
use crate::mcp::ToolRegistry;
use crate::models::resume::ResumeDocument;
use crate::qa::AnswerEngine;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything in here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<AnswerEngine>,
    pub registry: Arc<ToolRegistry>,
    pub gateway: NotificationGateway,
}

impl AppState {
    pub fn new(document: ResumeDocument, gateway: NotificationGateway) -> Result<Self> {
        let document = Arc::new(document);
        Ok(Self {
            engine: Arc::new(AnswerEngine::new(Arc::clone(&document))),
            registry: Arc::new(ToolRegistry::new(document)?),
            gateway,
        })
    }
}
