//! Document storage endpoints
//!
//! - List stored documents
//! - Upload a PDF (multipart field `file`)
//! - Fetch metadata, download, delete

use axum::{
    body::Body,
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use serde::Serialize;

use crate::document::DocumentMeta;
use crate::error::{AppError, Result};
use crate::state::AppState;

use super::{run_blocking, DocumentResponse};

/// Response for document list
#[derive(Serialize)]
pub struct DocumentListResponse {
    pub documents: Vec<DocumentMeta>,
}

/// Response for a deletion
#[derive(Serialize)]
pub struct DeleteResponse {
    pub status: &'static str,
    pub doc_id: String,
}

/// List all stored documents
pub async fn list_documents(State(state): State<AppState>) -> Json<DocumentListResponse> {
    Json(DocumentListResponse {
        documents: state.store().list(),
    })
}

/// Store a PDF sent via multipart form data
pub async fn upload_document(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<DocumentResponse>> {
    let mut multipart = multipart.map_err(|e| AppError::BadRequest(e.body_text()))?;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::error!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read upload: {}", e))
    })? {
        if field.name() != Some("file") {
            tracing::debug!("Ignoring multipart field {:?}", field.name());
            continue;
        }

        let filename = field.file_name().map(|s| s.to_string());
        let data = field.bytes().await.map_err(|e| {
            tracing::error!("Failed to read file data: {}", e);
            AppError::BadRequest(format!("Failed to read file data: {}", e))
        })?;

        tracing::debug!("Read {} bytes of file data ({:?})", data.len(), filename);

        let document = run_blocking(&state, move |state| {
            state.store().register(&data, filename.as_deref())
        })
        .await?;

        return Ok(Json(DocumentResponse { document }));
    }

    tracing::warn!("No file field found in multipart upload");
    Err(AppError::BadRequest("Missing file upload".to_string()))
}

/// Get metadata for one document
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DocumentResponse>> {
    let document = state.store().get(&id)?;
    Ok(Json(DocumentResponse { document }))
}

/// Download the binary PDF under its display name
pub async fn download_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    let meta = state.store().get(&id)?;

    let bytes = tokio::fs::read(&meta.path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AppError::NotFound(format!("Document {} not found", id))
        } else {
            AppError::Io(e)
        }
    })?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/pdf")
        .header(header::CONTENT_LENGTH, bytes.len())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", meta.name),
        )
        .body(Body::from(bytes))
        .map_err(|e| AppError::Internal(e.to_string()))
}

/// Remove a document from storage
pub async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let doc_id = id.clone();
    run_blocking(&state, move |state| state.store().delete(&id)).await?;

    Ok(Json(DeleteResponse {
        status: "deleted",
        doc_id,
    }))
}
