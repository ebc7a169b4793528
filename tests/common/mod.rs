// Shared fixtures for the integration tests: an in-memory meeting store,
// a mock OpenAI-compatible server and multipart request helpers.
#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::{Multipart, State},
    http::{header, Request, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::post,
    Router,
};
use meeting_summarizer::storage::StoreResult;
use meeting_summarizer::{
    AppState, Meeting, MeetingListing, MeetingStore, MeetingSummary, StoreError,
    SummarizationClient, SummaryParams, TranscriptionClient,
};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::{Arc, Mutex};

pub const BOUNDARY: &str = "meeting-summarizer-test-boundary";

// ============================================================================
// Stores
// ============================================================================

#[derive(Clone, Default)]
pub struct MemoryMeetingStore {
    meetings: Arc<Mutex<Vec<Meeting>>>,
}

impl MemoryMeetingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.meetings.lock().unwrap().len()
    }
}

#[async_trait]
impl MeetingStore for MemoryMeetingStore {
    async fn ensure_schema(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn insert(&self, meeting: &Meeting) -> StoreResult<()> {
        let mut meetings = self.meetings.lock().unwrap();
        if meetings.iter().any(|m| m.id == meeting.id) {
            return Err(StoreError::Conflict(meeting.id.clone()));
        }
        meetings.push(meeting.clone());
        Ok(())
    }

    async fn list_all(&self) -> StoreResult<Vec<MeetingListing>> {
        let mut list: Vec<_> = self
            .meetings
            .lock()
            .unwrap()
            .iter()
            .map(|m| MeetingListing {
                id: m.id.clone(),
                filename: Some(m.filename.clone()),
                uploaded_at: Some(m.uploaded_at),
            })
            .collect();
        list.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        Ok(list)
    }

    async fn get_by_id(&self, id: &str) -> StoreResult<Option<MeetingSummary>> {
        Ok(self
            .meetings
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .map(|m| MeetingSummary {
                transcript: Some(m.transcript.clone()),
                summary: Some(m.summary.clone()),
            }))
    }
}

/// Store whose inserts always fail
pub struct RejectingStore;

#[async_trait]
impl MeetingStore for RejectingStore {
    async fn ensure_schema(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn insert(&self, meeting: &Meeting) -> StoreResult<()> {
        Err(StoreError::Conflict(meeting.id.clone()))
    }

    async fn list_all(&self) -> StoreResult<Vec<MeetingListing>> {
        Ok(Vec::new())
    }

    async fn get_by_id(&self, _id: &str) -> StoreResult<Option<MeetingSummary>> {
        Ok(None)
    }
}

// ============================================================================
// App state
// ============================================================================

pub fn offline_state(store: Arc<dyn MeetingStore>, storage_dir: &Path) -> AppState {
    state_with_clients(
        store,
        storage_dir,
        TranscriptionClient::new(None, "http://127.0.0.1:9", "whisper-1"),
        SummarizationClient::new(None, "http://127.0.0.1:9", SummaryParams::default()),
    )
}

pub fn state_with_clients(
    store: Arc<dyn MeetingStore>,
    storage_dir: &Path,
    transcriber: TranscriptionClient,
    summarizer: SummarizationClient,
) -> AppState {
    AppState {
        store,
        transcriber: Arc::new(transcriber),
        summarizer: Arc::new(summarizer),
        storage_dir: Arc::new(storage_dir.to_path_buf()),
    }
}

// ============================================================================
// Requests
// ============================================================================

/// Build a `POST /upload` request. `None` omits the filename attribute.
pub fn upload_request(filename: Option<&str>, content: &[u8]) -> Request<Body> {
    let disposition = match filename {
        Some(name) => format!("form-data; name=\"file\"; filename=\"{}\"", name),
        None => "form-data; name=\"file\"".to_string(),
    };

    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(format!("Content-Disposition: {}\r\n", disposition).as_bytes());
    body.extend_from_slice(b"Content-Type: audio/wav\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// ============================================================================
// Mock OpenAI-compatible server
// ============================================================================

#[derive(Clone, Default)]
pub struct MockOpenAi {
    /// Text returned by /audio/transcriptions
    pub transcript: String,
    /// Content returned by /chat/completions
    pub summary: String,
    /// Answer every call with a 500
    pub fail: bool,
    pub recorded: Arc<Mutex<Recorded>>,
}

#[derive(Debug, Default)]
pub struct Recorded {
    pub authorization: Vec<String>,
    /// (model, file name, byte count) per transcription call
    pub transcriptions: Vec<(String, String, usize)>,
    pub chat_requests: Vec<Value>,
}

impl MockOpenAi {
    pub fn new(transcript: &str, summary: &str) -> Self {
        Self {
            transcript: transcript.to_string(),
            summary: summary.to_string(),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Serve on an ephemeral port and return the base URL.
    pub async fn spawn(&self) -> String {
        let app = Router::new()
            .route("/audio/transcriptions", post(mock_transcription))
            .route("/chat/completions", post(mock_chat))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}", addr)
    }

    pub fn chat_calls(&self) -> usize {
        self.recorded.lock().unwrap().chat_requests.len()
    }
}

fn record_auth(mock: &MockOpenAi, headers: &axum::http::HeaderMap) {
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    mock.recorded.lock().unwrap().authorization.push(auth);
}

async fn mock_transcription(
    State(mock): State<MockOpenAi>,
    headers: axum::http::HeaderMap,
    mut multipart: Multipart,
) -> Response {
    record_auth(&mock, &headers);

    let mut model = String::new();
    let mut file_name = String::new();
    let mut size = 0;
    while let Some(field) = multipart.next_field().await.unwrap() {
        match field.name() {
            Some("model") => model = field.text().await.unwrap(),
            Some("file") => {
                file_name = field.file_name().unwrap_or_default().to_string();
                size = field.bytes().await.unwrap().len();
            }
            _ => {}
        }
    }
    mock.recorded
        .lock()
        .unwrap()
        .transcriptions
        .push((model, file_name, size));

    if mock.fail {
        return (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response();
    }
    Json(json!({ "text": mock.transcript })).into_response()
}

async fn mock_chat(
    State(mock): State<MockOpenAi>,
    headers: axum::http::HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    record_auth(&mock, &headers);
    mock.recorded.lock().unwrap().chat_requests.push(body);

    if mock.fail {
        return (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response();
    }
    Json(json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": mock.summary },
            "finish_reason": "stop"
        }]
    }))
    .into_response()
}
