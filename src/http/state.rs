use crate::ai::{SummarizationClient, SummaryParams, TranscriptionClient};
use crate::config::Config;
use crate::storage::MeetingStore;
use std::path::PathBuf;
use std::sync::Arc;

/// Shared application state for HTTP handlers
///
/// Everything here is read-only after startup; the database is the only
/// shared mutable resource.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MeetingStore>,
    pub transcriber: Arc<TranscriptionClient>,
    pub summarizer: Arc<SummarizationClient>,
    /// Directory raw uploads are written to
    pub storage_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(cfg: &Config, store: Arc<dyn MeetingStore>) -> Self {
        let api_key = cfg.api_key().map(str::to_string);

        let transcriber = TranscriptionClient::new(
            api_key.clone(),
            cfg.openai_base_url.clone(),
            cfg.transcription_model.clone(),
        );
        let summarizer = SummarizationClient::new(
            api_key,
            cfg.openai_base_url.clone(),
            SummaryParams {
                model: cfg.summary_model.clone(),
                max_tokens: cfg.summary_max_tokens,
                temperature: cfg.summary_temperature,
            },
        );

        Self {
            store,
            transcriber: Arc::new(transcriber),
            summarizer: Arc::new(summarizer),
            storage_dir: Arc::new(cfg.storage_dir.clone()),
        }
    }
}
