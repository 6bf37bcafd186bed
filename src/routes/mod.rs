//! Route modules for PdfShelf Server

pub mod documents;
pub mod edit;
pub mod health;
pub mod pages;

use axum::{
    routing::{get, post},
    Router,
};
use serde::Serialize;

use crate::document::{DocumentMeta, DocumentResult};
use crate::error::Result;
use crate::state::AppState;

/// Create the `/api` router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/documents", get(documents::list_documents))
        .route("/api/upload", post(documents::upload_document))
        .route(
            "/api/document/:id",
            get(documents::get_document).delete(documents::delete_document),
        )
        .route("/api/document/:id/download", get(documents::download_document))
        .route("/api/document/:id/pages", get(pages::page_previews))
        .route("/api/document/:id/slice", post(edit::slice_document))
        .route("/api/document/:id/rotate", post(edit::rotate_document))
        .route("/api/merge", post(edit::merge_documents))
}

/// `{document: DocumentMeta}`
#[derive(Serialize)]
pub struct DocumentResponse {
    pub document: DocumentMeta,
}

/// Run store / PDF engine work on the blocking pool
pub(crate) async fn run_blocking<F, T>(state: &AppState, work: F) -> Result<T>
where
    F: FnOnce(&AppState) -> DocumentResult<T> + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    Ok(tokio::task::spawn_blocking(move || work(&state)).await??)
}
