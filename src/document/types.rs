//! Core document types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Metadata about a single PDF stored on disk
///
/// Built once when the file is registered and never mutated afterwards;
/// `pages` is read from the file itself at that moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
    /// Opaque identifier, doubles as the file stem
    pub doc_id: String,
    /// Display name (used as the download filename)
    pub name: String,
    /// Location of the backing `{doc_id}.pdf`
    pub path: PathBuf,
    /// Page count of the backing file
    pub pages: usize,
}

/// One rendered page of a preview window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagePreview {
    /// 1-based page number
    pub index: usize,
    /// `data:image/png;base64,...`
    pub image: String,
}

/// A window of page previews plus the document's total page count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewPage {
    pub pages: Vec<PagePreview>,
    pub total_pages: usize,
}

/// Make a user-supplied filename safe to show and to put in a
/// Content-Disposition header.
pub fn sanitize_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            c if c.is_whitespace() => '_',
            '"' | '/' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}
