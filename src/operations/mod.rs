//! Document operations
//!
//! Stateless functions over the [`DocumentStore`](crate::store::DocumentStore):
//! previews return a view, while slice, merge and rotate each persist a new
//! document through `store_derived` and leave their sources untouched.
//!
//! Everything here blocks on file I/O and PDF parsing; async callers run it
//! on `spawn_blocking`.

mod merge;
mod preview;
mod rotate;
mod slice;

pub use merge::merge;
pub use preview::previews;
pub use rotate::{rotate, DEFAULT_ROTATION};
pub use slice::{slice, SliceSelection};

use lopdf::Document;

use crate::document::{DocumentError, DocumentMeta, DocumentResult};
use crate::pdf;

/// Convert a 1-based page number from a request into a page index the
/// engine understands, checking it against the document's page count.
pub(crate) fn checked_page(page: i64, total_pages: usize) -> DocumentResult<u32> {
    if page < 1 || page as u64 > total_pages as u64 {
        return Err(DocumentError::invalid(format!(
            "Page {} is out of range (document has {} pages)",
            page, total_pages
        )));
    }
    Ok(page as u32)
}

/// Open a registered document's backing file.
///
/// A file removed by a concurrent delete after the registry lookup is
/// reported as `NotFound` rather than a parse failure.
pub(crate) fn load_source(meta: &DocumentMeta) -> DocumentResult<Document> {
    pdf::load(&meta.path).map_err(|e| missing_as_not_found(meta, e))
}

pub(crate) fn missing_as_not_found(meta: &DocumentMeta, err: DocumentError) -> DocumentError {
    if meta.path.exists() {
        err
    } else {
        DocumentError::NotFound(meta.doc_id.clone())
    }
}
