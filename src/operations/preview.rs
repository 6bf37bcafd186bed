use crate::document::{DocumentError, DocumentResult, PreviewPage};
use crate::preview::PreviewRenderer;
use crate::store::DocumentStore;

use super::missing_as_not_found;

/// Render previews for a window of pages.
///
/// `offset` is 0-based; `limit` caps the number of pages rendered.
pub fn previews(
    store: &DocumentStore,
    renderer: &PreviewRenderer,
    doc_id: &str,
    offset: i64,
    limit: Option<i64>,
) -> DocumentResult<PreviewPage> {
    if offset < 0 {
        return Err(DocumentError::invalid("offset must be greater than or equal to 0"));
    }
    let limit = match limit {
        Some(limit) if limit < 1 => {
            return Err(DocumentError::invalid("limit must be greater than 0"));
        }
        Some(limit) => Some(usize::try_from(limit).unwrap_or(usize::MAX)),
        None => None,
    };

    let meta = store.get(doc_id)?;
    let offset = usize::try_from(offset).unwrap_or(usize::MAX);
    renderer
        .render_window(&meta.path, offset, limit)
        .map_err(|e| match e {
            DocumentError::Unavailable(_) => e,
            e => missing_as_not_found(&meta, e),
        })
}
