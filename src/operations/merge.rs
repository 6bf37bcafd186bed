use crate::document::{DocumentError, DocumentMeta, DocumentResult};
use crate::pdf;
use crate::store::DocumentStore;

use super::load_source;

/// Concatenate documents in the order their ids are given.
///
/// Every id is resolved before anything is read, so an unknown id fails
/// the whole merge without side effects.
pub fn merge(store: &DocumentStore, doc_ids: &[String], output_name: Option<&str>) -> DocumentResult<DocumentMeta> {
    if doc_ids.is_empty() {
        return Err(DocumentError::invalid("No documents provided for merging"));
    }

    let sources = doc_ids
        .iter()
        .map(|id| store.get(id))
        .collect::<DocumentResult<Vec<_>>>()?;

    tracing::debug!("Merging {} documents", sources.len());

    let documents = sources
        .iter()
        .map(load_source)
        .collect::<DocumentResult<Vec<_>>>()?;

    let mut merged = pdf::concatenate(documents)?;
    store.store_derived(move |out| pdf::write(&mut merged, out), output_name)
}
