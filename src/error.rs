//! Error types for the PdfShelf server

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::document::DocumentError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(format!("Task join error: {}", err))
    }
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            AppError::Document(e) => match e {
                DocumentError::NotFound(_) => (StatusCode::NOT_FOUND, e.to_string()),
                DocumentError::InvalidArgument(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                DocumentError::Unavailable(msg) => {
                    tracing::warn!("Capability unavailable: {}", msg);
                    (StatusCode::SERVICE_UNAVAILABLE, msg.clone())
                }
                _ => {
                    tracing::error!("Document error: {}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Failed to process document".to_string(),
                    )
                }
            },
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Io(e) => {
                tracing::error!("IO error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "IO error".to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = self.status_and_message();
        (status, Json(ErrorResponse { error })).into_response()
    }
}
