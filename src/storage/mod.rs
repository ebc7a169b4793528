//! Storage Gateway for meeting records
//!
//! A meeting row is written once at the end of an upload and never updated
//! or deleted by the service.

mod mysql;

pub use mysql::MySqlMeetingStore;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Full meeting record as inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meeting {
    pub id: String,
    pub filename: String,
    pub uploaded_at: NaiveDateTime,
    pub transcript: String,
    pub summary: String,
}

/// Row shape returned by `GET /list` (no transcript/summary)
///
/// Columns other than `id` are nullable in the table; rows written
/// out-of-band may carry NULLs, which serialize as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MeetingListing {
    pub id: String,
    pub filename: Option<String>,
    pub uploaded_at: Option<NaiveDateTime>,
}

/// Row shape returned by `GET /summary/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MeetingSummary {
    pub transcript: Option<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("MySQL error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("MySQL error: meeting {0} already exists")]
    Conflict(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[async_trait]
pub trait MeetingStore: Send + Sync {
    /// Create the meetings table if it does not exist yet.
    async fn ensure_schema(&self) -> StoreResult<()>;

    /// Insert a new record. A duplicate id is a `Conflict`.
    async fn insert(&self, meeting: &Meeting) -> StoreResult<()>;

    /// All meetings, most recent upload first.
    async fn list_all(&self) -> StoreResult<Vec<MeetingListing>>;

    async fn get_by_id(&self, id: &str) -> StoreResult<Option<MeetingSummary>>;
}
