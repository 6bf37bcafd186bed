//! Endpoints that derive new documents: slice, merge, rotate

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Deserialize;

use crate::error::Result;
use crate::operations::{self, SliceSelection, DEFAULT_ROTATION};
use crate::state::AppState;

use super::{run_blocking, DocumentResponse};

/// Slice request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliceRequest {
    pub start_page: Option<i64>,
    pub end_page: Option<i64>,
    pub pages: Option<Vec<i64>>,
}

/// Merge request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeRequest {
    #[serde(default)]
    pub document_ids: Vec<String>,
    pub name: Option<String>,
}

/// Rotate request body
#[derive(Debug, Deserialize)]
pub struct RotateRequest {
    #[serde(default)]
    pub pages: Vec<i64>,
    #[serde(default = "default_angle")]
    pub angle: i64,
}

fn default_angle() -> i64 {
    DEFAULT_ROTATION
}

/// Create a new PDF containing only the requested pages
pub async fn slice_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<SliceRequest>, JsonRejection>,
) -> Result<Json<DocumentResponse>> {
    let Json(request) = payload?;
    // Unknown ids are 404 regardless of the selection
    state.store().get(&id)?;
    let selection = SliceSelection::from_request(request.start_page, request.end_page, request.pages)?;

    let document = run_blocking(&state, move |state| {
        operations::slice(state.store(), &id, &selection)
    })
    .await?;

    tracing::info!("Sliced into {} ({} pages)", document.doc_id, document.pages);
    Ok(Json(DocumentResponse { document }))
}

/// Merge documents in the order given
pub async fn merge_documents(
    State(state): State<AppState>,
    payload: std::result::Result<Json<MergeRequest>, JsonRejection>,
) -> Result<Json<DocumentResponse>> {
    let Json(request) = payload?;

    let document = run_blocking(&state, move |state| {
        operations::merge(state.store(), &request.document_ids, request.name.as_deref())
    })
    .await?;

    tracing::info!("Merged into {} ({} pages)", document.doc_id, document.pages);
    Ok(Json(DocumentResponse { document }))
}

/// Rotate selected pages into a new PDF
pub async fn rotate_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<RotateRequest>, JsonRejection>,
) -> Result<Json<DocumentResponse>> {
    let Json(request) = payload?;

    let document = run_blocking(&state, move |state| {
        operations::rotate(state.store(), &id, &request.pages, request.angle)
    })
    .await?;

    tracing::info!("Rotated into {} ({} pages)", document.doc_id, document.pages);
    Ok(Json(DocumentResponse { document }))
}
