use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::models::resume::ResumeDocument;

/// Reads and parses the resume document. Called once at startup; any error
/// here is fatal because no request can be served without the document.
pub fn load_resume(path: &Path) -> Result<ResumeDocument> {
    info!("Loading resume document from {}", path.display());

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read resume document at {}", path.display()))?;
    let document: ResumeDocument = serde_json::from_str(&raw)
        .with_context(|| format!("Resume document at {} is not valid", path.display()))?;

    info!(
        "Resume loaded: {} experience entries, {} projects",
        document.experience.len(),
        document.projects.len()
    );
    Ok(document)
}
