//! HTTP API server
//!
//! - POST /upload - Store, transcribe, summarize and record an audio file
//! - GET /list - List stored meetings, newest first
//! - GET /summary/:id - Transcript and summary for one meeting
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use handlers::{ListResponse, UploadResponse};
pub use routes::create_router;
pub use state::AppState;
