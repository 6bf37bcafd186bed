//! Storage directory scanner
//!
//! Every `*.pdf` file in the storage directory becomes a document whose id
//! is the file stem and whose display name is the sanitized file name. Files that cannot be parsed are skipped with a warning
//! so one bad file does not keep the server from starting.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::document::{sanitize_name, DocumentMeta, DocumentResult};
use crate::pdf;

/// Build the registry for `dir`, ordered by filename
pub(super) fn scan_directory(dir: &Path) -> DocumentResult<IndexMap<String, DocumentMeta>> {
    tracing::info!("Scanning {} for documents...", dir.display());
    let start = std::time::Instant::now();

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && is_pdf(path))
        .collect();
    paths.sort();

    let mut documents = IndexMap::with_capacity(paths.len());
    for path in paths {
        match metadata_for(&path) {
            Ok(Some(meta)) => {
                documents.insert(meta.doc_id.clone(), meta);
            }
            Ok(None) => {
                tracing::debug!("Skipping file without usable name: {}", path.display());
            }
            Err(e) => {
                tracing::warn!("Error indexing {}: {}", path.display(), e);
            }
        }
    }

    tracing::info!(
        "Scan complete: {} documents in {:?}",
        documents.len(),
        start.elapsed()
    );
    Ok(documents)
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

fn metadata_for(path: &Path) -> DocumentResult<Option<DocumentMeta>> {
    let (Some(stem), Some(name)) = (
        path.file_stem().and_then(|s| s.to_str()),
        path.file_name().and_then(|s| s.to_str()),
    ) else {
        return Ok(None);
    };

    let pages = pdf::page_count(path)?;
    Ok(Some(DocumentMeta {
        doc_id: stem.to_string(),
        name: sanitize_name(name),
        path: path.to_path_buf(),
        pages,
    }))
}
