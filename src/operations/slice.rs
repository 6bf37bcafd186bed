use std::collections::BTreeSet;

use crate::document::{DocumentError, DocumentMeta, DocumentResult};
use crate::pdf;
use crate::store::DocumentStore;

use super::{checked_page, load_source};

/// Which pages of the source end up in a slice
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SliceSelection {
    /// Inclusive 1-based range, kept in natural order
    Range { start: i64, end: i64 },
    /// Explicit 1-based page numbers; deduplicated and sorted ascending
    Pages(Vec<i64>),
}

impl SliceSelection {
    /// Interpret the optional request fields.
    ///
    /// A page list and a range are mutually exclusive, and one of them must
    /// be given: there is no implicit "page 1" slice. Within a range a
    /// missing start is 1 and a missing end equals start.
    pub fn from_request(
        start: Option<i64>,
        end: Option<i64>,
        pages: Option<Vec<i64>>,
    ) -> DocumentResult<Self> {
        match (start, end, pages) {
            (None, None, Some(pages)) => Ok(SliceSelection::Pages(pages)),
            (_, _, Some(_)) => Err(DocumentError::invalid(
                "Provide either a page list or a start/end range, not both",
            )),
            (None, None, None) => Err(DocumentError::invalid(
                "A page range (startPage/endPage) or a page list is required",
            )),
            (start, end, None) => {
                let start = start.unwrap_or(1);
                Ok(SliceSelection::Range {
                    start,
                    end: end.unwrap_or(start),
                })
            }
        }
    }

    /// Resolve to the 1-based pages to keep, in output order
    fn resolve(&self, total_pages: usize) -> DocumentResult<Vec<u32>> {
        match self {
            SliceSelection::Range { start, end } => {
                if *start < 1 || *end as u64 > total_pages as u64 || start > end {
                    return Err(DocumentError::invalid(format!(
                        "Invalid page range for slicing: {}-{} (document has {} pages)",
                        start, end, total_pages
                    )));
                }
                Ok((*start as u32..=*end as u32).collect())
            }
            SliceSelection::Pages(pages) => {
                let unique = pages
                    .iter()
                    .map(|&page| checked_page(page, total_pages))
                    .collect::<DocumentResult<BTreeSet<u32>>>()?;
                if unique.is_empty() {
                    return Err(DocumentError::invalid("No pages selected for slicing"));
                }
                Ok(unique.into_iter().collect())
            }
        }
    }
}

/// Create a new document holding only the selected pages of `doc_id`
pub fn slice(store: &DocumentStore, doc_id: &str, selection: &SliceSelection) -> DocumentResult<DocumentMeta> {
    let meta = store.get(doc_id)?;
    let pages = selection.resolve(meta.pages)?;

    tracing::debug!("Slicing {} to pages {:?}", doc_id, pages);

    let source = load_source(&meta)?;
    let mut sliced = pdf::extract_pages(source, &pages)?;
    store.store_derived(move |out| pdf::write(&mut sliced, out), None)
}
