//! Page preview endpoint
//!
//! `GET /api/document/:id/pages?offset=&limit=` renders only the requested
//! window so large documents can be previewed incrementally.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::document::PreviewPage;
use crate::error::{AppError, Result};
use crate::operations;
use crate::state::AppState;

use super::run_blocking;

/// Raw window parameters; parsed by hand so bad values get a JSON error
#[derive(Debug, Default, Deserialize)]
pub struct PageWindowQuery {
    pub offset: Option<String>,
    pub limit: Option<String>,
}

impl PageWindowQuery {
    fn parse(&self) -> Result<(i64, Option<i64>)> {
        let parse = |raw: &str| {
            raw.trim()
                .parse::<i64>()
                .map_err(|_| AppError::BadRequest("offset and limit must be integers".to_string()))
        };

        let offset = self.offset.as_deref().map(parse).transpose()?.unwrap_or(0);
        let limit = self.limit.as_deref().map(parse).transpose()?;
        Ok((offset, limit))
    }
}

/// Return previews for a window of pages
pub async fn page_previews(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<PageWindowQuery>,
) -> Result<Json<PreviewPage>> {
    let (offset, limit) = query.parse()?;

    let page = run_blocking(&state, move |state| {
        operations::previews(state.store(), state.renderer(), &id, offset, limit)
    })
    .await?;

    Ok(Json(page))
}
