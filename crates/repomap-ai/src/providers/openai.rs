//! OpenAI-compatible chat-completions summarizer

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::summarizer::{FileSummary, Summarizer};

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const MAX_CONTENT_CHARS: usize = 12_000;

pub struct OpenAiSummarizer {
    client: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl OpenAiSummarizer {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key
                .unwrap_or_else(|| std::env::var("OPENAI_API_KEY").unwrap_or_default()),
            model: "gpt-4o-mini".to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    /// Point at a different OpenAI-compatible endpoint.
    pub fn with_endpoint(mut self, endpoint: String) -> Self {
        self.endpoint = endpoint;
        self
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    total_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    purpose: String,
    #[serde(default)]
    responsibilities: Vec<String>,
    #[serde(default)]
    relationships: Vec<String>,
    #[serde(default)]
    technical_debt: Vec<String>,
}

#[async_trait::async_trait]
impl Summarizer for OpenAiSummarizer {
    async fn summarize(&self, path: &Path, content: &str) -> Result<FileSummary> {
        let truncated = if content.len() > MAX_CONTENT_CHARS {
            let mut end = MAX_CONTENT_CHARS;
            while !content.is_char_boundary(end) {
                end -= 1;
            }
            &content[..end]
        } else {
            content
        };

        let prompt = format!(
            r#"Summarize this source file for an engineer exploring an unfamiliar codebase.

File: {}

```
{}
```

Return JSON in this format:
{{
  "purpose": "one sentence",
  "responsibilities": ["..."],
  "relationships": ["..."],
  "technical_debt": ["..."]
}}"#,
            path.display(),
            truncated
        );

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: "You are a code documentation expert. Provide concise, accurate summaries and return valid JSON.".to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt,
                },
            ],
            temperature: 0.2,
            max_tokens: 600,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send request to summarizer endpoint")?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Summarizer API error: {}", error_text);
        }

        let chat_response: ChatResponse = response.json().await?;
        let content = chat_response
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .context("Summarizer returned no choices")?;

        // The model may wrap the JSON in prose or a code fence.
        let json_start = content.find('{').context("No JSON object in response")?;
        let json_end = content.rfind('}').context("No JSON object in response")? + 1;
        let parsed: SummaryResponse = serde_json::from_str(&content[json_start..json_end])
            .context("Failed to parse summarizer response JSON")?;

        if let Some(usage) = chat_response.usage {
            tracing::debug!("summarizer used {} tokens", usage.total_tokens);
        }

        Ok(FileSummary {
            purpose: parsed.purpose,
            responsibilities: parsed.responsibilities,
            relationships: parsed.relationships,
            technical_debt: parsed.technical_debt,
        })
    }

    fn name(&self) -> &str {
        "OpenAI"
    }
}
