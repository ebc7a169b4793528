pub mod ai;
pub mod config;
pub mod error;
pub mod http;
pub mod storage;

pub use ai::{SummarizationClient, SummaryParams, TranscriptionClient};
pub use crate::config::Config;
pub use error::AppError;
pub use http::{create_router, AppState};
pub use storage::{
    Meeting, MeetingListing, MeetingStore, MeetingSummary, MySqlMeetingStore, StoreError,
};
