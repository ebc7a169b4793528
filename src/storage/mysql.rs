use super::{Meeting, MeetingListing, MeetingStore, MeetingSummary, StoreError, StoreResult};
use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use tracing::info;

const CREATE_MEETINGS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS meetings (
    id VARCHAR(255) PRIMARY KEY,
    filename VARCHAR(255),
    uploaded_at DATETIME(6),
    transcript LONGTEXT,
    summary LONGTEXT
)
"#;

/// MySQL-backed meeting store.
///
/// Each operation checks a connection out of the pool for its own duration
/// and returns it on completion, error or not.
pub struct MySqlMeetingStore {
    pool: MySqlPool,
}

impl MySqlMeetingStore {
    /// Connect eagerly so an unreachable database fails at startup.
    pub async fn connect(cfg: &Config) -> Result<Self> {
        info!(
            "Connecting to MySQL at {}:{} (database {})",
            cfg.mysql_host, cfg.mysql_port, cfg.mysql_db
        );

        let options = MySqlConnectOptions::new()
            .host(&cfg.mysql_host)
            .port(cfg.mysql_port)
            .username(&cfg.mysql_user)
            .password(&cfg.mysql_password)
            .database(&cfg.mysql_db);

        let pool = MySqlPoolOptions::new()
            .connect_with(options)
            .await
            .context("Failed to connect to MySQL")?;

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

#[async_trait]
impl MeetingStore for MySqlMeetingStore {
    async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::query(CREATE_MEETINGS_TABLE)
            .execute(&self.pool)
            .await?;

        info!("MySQL database initialized");
        Ok(())
    }

    async fn insert(&self, meeting: &Meeting) -> StoreResult<()> {
        let result = sqlx::query(
            "INSERT INTO meetings (id, filename, uploaded_at, transcript, summary) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&meeting.id)
        .bind(&meeting.filename)
        .bind(meeting.uploaded_at)
        .bind(&meeting.transcript)
        .bind(&meeting.summary)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(StoreError::Conflict(meeting.id.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn list_all(&self) -> StoreResult<Vec<MeetingListing>> {
        let rows = sqlx::query_as::<_, MeetingListing>(
            "SELECT id, filename, uploaded_at FROM meetings ORDER BY uploaded_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn get_by_id(&self, id: &str) -> StoreResult<Option<MeetingSummary>> {
        let row = sqlx::query_as::<_, MeetingSummary>(
            "SELECT transcript, summary FROM meetings WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
