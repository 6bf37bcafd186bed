//! PdfShelf Server Library
//!
//! A small PDF management service: uploads are stored as `{id}.pdf` in a
//! flat directory, listed, previewed page by page, and turned into new
//! documents by slicing, merging and rotating.
//!
//! # Modules
//!
//! - `store`: id → metadata registry over the storage directory
//! - `operations`: preview, slice, merge and rotate over stored documents
//! - `pdf`: page-tree editing via lopdf
//! - `preview`: page rasterization via MuPDF (feature `render`)
//! - `routes`: the `/api` HTTP surface

pub mod config;
pub mod document;
pub mod error;
pub mod operations;
pub mod pdf;
pub mod preview;
pub mod routes;
pub mod state;
pub mod store;

use axum::{extract::DefaultBodyLimit, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the full application router
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = state.config().server.max_upload_bytes;

    routes::router()
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
