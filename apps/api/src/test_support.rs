//! Shared fixtures for unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::Config;
use crate::mailer::{MailError, Mailer, NotificationGateway};
use crate::models::resume::ResumeDocument;
use crate::state::AppState;

pub const SAMPLE_CV_JSON: &str = include_str!("../data/cv_data.json");

pub fn sample_document() -> ResumeDocument {
    serde_json::from_str(SAMPLE_CV_JSON).unwrap()
}

/// A sent message as seen by [`RecordingMailer`].
#[derive(Debug, Clone, PartialEq)]
pub struct SentMail {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

/// Mailer that records every message instead of delivering it.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<SentMail>>,
    pub fail_with: Option<String>,
}

impl RecordingMailer {
    pub fn failing(message: &str) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_with: Some(message.to_string()),
        }
    }

    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), MailError> {
        if let Some(message) = &self.fail_with {
            return Err(MailError::Transport(message.clone()));
        }
        self.sent.lock().unwrap().push(SentMail {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

pub fn test_config() -> Config {
    Config::from_lookup(|_| None).unwrap()
}

pub fn test_state(mailer: Arc<RecordingMailer>) -> AppState {
    let gateway = NotificationGateway::new(mailer, test_config().smtp_timeout);
    AppState::new(sample_document(), gateway).unwrap()
}
