use super::state::AppState;
use crate::error::{AppError, Result};
use crate::storage::{Meeting, MeetingListing, MeetingSummary};
use axum::{
    body::Bytes,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use std::path::Path as FsPath;
use tracing::info;
use uuid::Uuid;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Multipart field carrying the audio file
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub id: String,
    pub filename: String,
    pub transcript: String,
    pub summary: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse {
    pub meetings: Vec<MeetingListing>,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /upload
/// Save the file, transcribe it, summarize the transcript, record the result
pub async fn upload_audio(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let (original_name, content) = read_file_field(&mut multipart).await?;

    let meeting_id = Uuid::new_v4().to_string();
    let filename = stored_filename(&meeting_id, &original_name);
    let dest_path = state.storage_dir.join(&filename);

    info!("Uploading file: {} -> {}", original_name, dest_path.display());
    tokio::fs::write(&dest_path, &content).await?;

    info!("Starting transcription for meeting: {}", meeting_id);
    let transcript = state.transcriber.transcribe(&dest_path).await;

    // Runs on sentinel text too
    info!("Generating summary for meeting: {}", meeting_id);
    let summary = state.summarizer.summarize(&transcript).await;

    let meeting = Meeting {
        id: meeting_id,
        filename,
        uploaded_at: chrono::Utc::now().naive_utc(),
        transcript,
        summary,
    };
    state.store.insert(&meeting).await?;

    info!("Meeting {} processed and stored", meeting.id);

    Ok(Json(UploadResponse {
        id: meeting.id,
        filename: meeting.filename,
        transcript: meeting.transcript,
        summary: meeting.summary,
        message: "Audio processed and stored successfully!".to_string(),
    }))
}

/// GET /list
/// List all stored meetings, most recent first
pub async fn list_meetings(State(state): State<AppState>) -> Result<Json<ListResponse>> {
    let meetings = state.store.list_all().await?;
    Ok(Json(ListResponse { meetings }))
}

/// GET /summary/:meeting_id
/// Fetch transcript and summary for one meeting
pub async fn get_summary(
    State(state): State<AppState>,
    Path(meeting_id): Path<String>,
) -> Result<Json<MeetingSummary>> {
    state
        .store
        .get_by_id(&meeting_id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

// ============================================================================
// Helpers
// ============================================================================

/// Pull the uploaded file out of the payload. Nothing is written before the
/// filename has been checked.
async fn read_file_field(multipart: &mut Multipart) -> Result<(String, Bytes)> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let original_name = field
            .file_name()
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .ok_or(AppError::MissingFilename)?;
        let content = field.bytes().await?;

        return Ok((original_name, content));
    }

    Err(AppError::MissingFilename)
}

/// `{id}{ext}`, where `ext` keeps its leading dot and may be empty.
fn stored_filename(meeting_id: &str, original_name: &str) -> String {
    format!("{}{}", meeting_id, extension_of(original_name))
}

/// Extension of the final path component, dot included. Leading dots belong
/// to the stem, so `.hidden`, `...` and `..wav` have none.
fn extension_of(original_name: &str) -> String {
    let name = FsPath::new(original_name)
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    let stem = name.trim_start_matches('.');

    match stem.rfind('.') {
        Some(idx) => stem[idx..].to_string(),
        None => String::new(),
    }
}
