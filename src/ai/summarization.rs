use super::MISSING_KEY_DETAIL;
use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

pub const FAILED_PREFIX: &str = "[SUMMARY-FAILED]";
pub const ERROR_PREFIX: &str = "[SUMMARY-ERROR]";

/// Returned without a remote call when the transcript is too short.
pub const TOO_SHORT_SUMMARY: &str = "Transcript too short for summarization.";

/// Minimum trimmed transcript length (in characters) worth summarizing
pub const MIN_TRANSCRIPT_CHARS: usize = 50;

const SYSTEM_PROMPT: &str = "You are an efficient and precise meeting summarizer.";

/// Fixed generation parameters for the chat-completion call
#[derive(Debug, Clone)]
pub struct SummaryParams {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for SummaryParams {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            max_tokens: 400,
            temperature: 0.4,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Chat-completion summarization client (`POST {base}/chat/completions`)
#[derive(Debug, Clone)]
pub struct SummarizationClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    params: SummaryParams,
}

impl SummarizationClient {
    pub fn new(
        api_key: Option<String>,
        base_url: impl Into<String>,
        params: SummaryParams,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            params,
        }
    }

    /// Summarize a transcript. Always returns text.
    ///
    /// The transcript is sent verbatim, including any sentinel text left by a
    /// failed transcription.
    pub async fn summarize(&self, transcript: &str) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            return format!("{FAILED_PREFIX} {MISSING_KEY_DETAIL}");
        };

        if transcript.trim().chars().count() < MIN_TRANSCRIPT_CHARS {
            return TOO_SHORT_SUMMARY.to_string();
        }

        info!("Generating summary with {}", self.params.model);

        match self.request(api_key, transcript).await {
            Ok(summary) => {
                info!("Summary generated ({} chars)", summary.len());
                summary.trim().to_string()
            }
            Err(e) => {
                error!("Summarization failed: {:#}", e);
                format!("{ERROR_PREFIX} {e:#}")
            }
        }
    }

    async fn request(&self, api_key: &str, transcript: &str) -> Result<String> {
        let body = ChatCompletionRequest {
            model: &self.params.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: Some(SYSTEM_PROMPT.to_string()),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: Some(format!(
                        "Please summarize this meeting concisely:\n\n{transcript}"
                    )),
                },
            ],
            max_tokens: self.params.max_tokens,
            temperature: self.params.temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {api_key}"))
            .json(&body)
            .send()
            .await
            .context("Chat completion request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Chat completion failed ({status}): {error_text}");
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .context("Failed to parse completion response")?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .context("No completion content returned")
    }
}
