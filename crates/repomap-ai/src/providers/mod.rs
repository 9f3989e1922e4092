//! Summarizer provider implementations

pub mod openai;

use anyhow::Result;

use crate::summarizer::Summarizer;

/// Factory function to create summarizer providers
pub fn create_provider(provider_name: &str, api_key: Option<String>) -> Result<Box<dyn Summarizer>> {
    match provider_name {
        "openai" => Ok(Box::new(openai::OpenAiSummarizer::new(api_key))),
        _ => anyhow::bail!("Unknown summarizer provider: {}", provider_name),
    }
}
