//! PDF structure engine
//!
//! Thin layer over `lopdf` providing the primitives the operations need:
//! open a document, read its page count, rebuild it with a subset of pages,
//! concatenate documents, rotate pages and write the result out.
//!
//! Rasterization lives in [`crate::preview`]; nothing here renders.

mod editor;

use std::io::Write;
use std::path::Path;

use lopdf::Document;

use crate::document::{DocumentError, DocumentResult};

pub use editor::{concatenate, effective_rotation, extract_pages, rotate_pages};

/// Open a PDF from disk
pub fn load<P: AsRef<Path>>(path: P) -> DocumentResult<Document> {
    let path = path.as_ref();
    Document::load(path).map_err(|e| {
        DocumentError::ParseError(format!("Failed to load {}: {}", path.display(), e))
    })
}

/// Parse a PDF held in memory
pub fn load_mem(bytes: &[u8]) -> DocumentResult<Document> {
    Document::load_mem(bytes).map_err(|e| DocumentError::ParseError(e.to_string()))
}

/// Number of pages reachable from the document's page tree
pub fn page_count<P: AsRef<Path>>(path: P) -> DocumentResult<usize> {
    Ok(load(path)?.get_pages().len())
}

/// Serialize a document into `out`
pub fn write(doc: &mut Document, mut out: &mut dyn Write) -> DocumentResult<()> {
    doc.save_to(&mut out)
        .map_err(|e| DocumentError::ParseError(format!("Save failed: {}", e)))?;
    Ok(())
}
