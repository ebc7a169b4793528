use super::MISSING_KEY_DETAIL;
use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::path::Path;
use tracing::{error, info};

pub const FAILED_PREFIX: &str = "[TRANSCRIPTION-FAILED]";
pub const ERROR_PREFIX: &str = "[TRANSCRIPTION-ERROR]";

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// Whisper-style transcription client (`POST {base}/audio/transcriptions`)
#[derive(Debug, Clone)]
pub struct TranscriptionClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl TranscriptionClient {
    pub fn new(
        api_key: Option<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    /// Transcribe the audio file at `path` in a single request.
    ///
    /// Always returns text; see the module docs for the sentinel values.
    pub async fn transcribe(&self, path: &Path) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            return format!("{FAILED_PREFIX} {MISSING_KEY_DETAIL}");
        };

        info!("Sending '{}' for transcription", display_name(path));

        match self.request(api_key, path).await {
            Ok(text) => {
                info!("Transcription complete ({} chars)", text.len());
                text.trim().to_string()
            }
            Err(e) => {
                error!("Transcription failed: {:#}", e);
                format!("{ERROR_PREFIX} {e:#}")
            }
        }
    }

    async fn request(&self, api_key: &str, path: &Path) -> Result<String> {
        let audio = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read audio file {}", path.display()))?;

        let form = reqwest::multipart::Form::new()
            .text("model", self.model.clone())
            .part(
                "file",
                reqwest::multipart::Part::bytes(audio).file_name(display_name(path)),
            );

        let response = self
            .client
            .post(format!("{}/audio/transcriptions", self.base_url))
            .header("Authorization", format!("Bearer {api_key}"))
            .multipart(form)
            .send()
            .await
            .context("Failed to send request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("API error ({status}): {error_text}");
        }

        let resp: TranscriptionResponse = response
            .json()
            .await
            .context("Failed to parse API response")?;

        Ok(resp.text)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "audio".to_string())
}
