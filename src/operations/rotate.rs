use std::collections::BTreeSet;

use crate::document::{DocumentError, DocumentMeta, DocumentResult};
use crate::pdf;
use crate::store::DocumentStore;

use super::{checked_page, load_source};

/// Rotation applied when a request does not name an angle
pub const DEFAULT_ROTATION: i64 = 90;

/// Create a copy of `doc_id` with `angle` degrees added to each listed page
pub fn rotate(store: &DocumentStore, doc_id: &str, pages: &[i64], angle: i64) -> DocumentResult<DocumentMeta> {
    if pages.is_empty() {
        return Err(DocumentError::invalid("No pages supplied for rotation"));
    }

    let meta = store.get(doc_id)?;
    let selected = pages
        .iter()
        .map(|&page| checked_page(page, meta.pages))
        .collect::<DocumentResult<BTreeSet<u32>>>()?;

    tracing::debug!("Rotating pages {:?} of {} by {}", selected, doc_id, angle);

    let source = load_source(&meta)?;
    let mut rotated = pdf::rotate_pages(source, &selected, angle)?;
    store.store_derived(move |out| pdf::write(&mut rotated, out), None)
}
