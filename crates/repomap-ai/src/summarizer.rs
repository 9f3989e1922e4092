//! Summarizer trait and summary payload

use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Structured summary of one source file, shaped for a detail panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSummary {
    /// One-sentence statement of what the file is for.
    pub purpose: String,
    /// The file's main responsibilities.
    pub responsibilities: Vec<String>,
    /// How the file relates to the rest of the codebase.
    pub relationships: Vec<String>,
    /// Anything worth flagging: smells, TODO debt, risky patterns.
    pub technical_debt: Vec<String>,
}

/// A backend capable of summarizing source files.
#[async_trait::async_trait]
pub trait Summarizer: Send + Sync {
    /// Produce a summary for the file at `path` with the given content.
    async fn summarize(&self, path: &Path, content: &str) -> Result<FileSummary>;

    /// Human-readable provider name for logging.
    fn name(&self) -> &str;
}
