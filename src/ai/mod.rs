//! Clients for the remote speech-to-text and chat-completion services
//!
//! Neither client returns an error. A missing credential or a failed remote
//! call comes back as a prefixed sentinel string, which is stored and served
//! like any other transcript or summary text:
//! - `[TRANSCRIPTION-FAILED]` / `[SUMMARY-FAILED]`: no credential configured
//! - `[TRANSCRIPTION-ERROR]` / `[SUMMARY-ERROR]`: the remote call failed
//!
//! Callers must not branch on these values.

pub mod summarization;
pub mod transcription;

pub use summarization::{SummarizationClient, SummaryParams, TOO_SHORT_SUMMARY};
pub use transcription::TranscriptionClient;

/// Text stored in place of a result when no credential is configured
pub(crate) const MISSING_KEY_DETAIL: &str = "OPENAI_API_KEY not set.";
