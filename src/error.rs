//! Request-level failures for the HTTP API
//!
//! These abort the request. Transcription and summarization failures never
//! show up here; they are carried as sentinel text instead (see `ai`).
use crate::storage::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("No filename provided")]
    MissingFilename,

    #[error("Invalid multipart payload: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    #[error("Failed to store upload: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Storage(#[from] StoreError),

    #[error("Meeting not found")]
    NotFound,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingFilename | AppError::Multipart(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Io(_) | AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("{}", self);
        }

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
