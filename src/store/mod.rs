//! Document store
//!
//! Registry of every PDF in the storage directory. Files are laid out flat
//! as `{doc_id}.pdf`; the in-memory map is rebuilt from that directory at
//! startup and kept in sync by `register`, `store_derived` and `delete`.
//!
//! New files are written and renamed into place before they are registered,
//! and deletions unregister before the file is removed, so the registry never
//! points at a half-written file. The lock only guards the map itself; disk
//! I/O happens outside it.

mod scanner;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use parking_lot::Mutex;
use uuid::Uuid;

use crate::document::{sanitize_name, DocumentError, DocumentMeta, DocumentResult};
use crate::pdf;

/// Extension of files that are written but not yet registered
const PARTIAL_SUFFIX: &str = "part";

/// Thread-safe id → metadata registry backed by a directory of PDFs
pub struct DocumentStore {
    storage_dir: PathBuf,
    documents: Mutex<IndexMap<String, DocumentMeta>>,
}

impl DocumentStore {
    /// Open (creating if needed) the storage directory and index every PDF in it
    pub fn open<P: AsRef<Path>>(storage_dir: P) -> DocumentResult<Self> {
        let storage_dir = storage_dir.as_ref().to_path_buf();
        fs::create_dir_all(&storage_dir)?;

        let documents = scanner::scan_directory(&storage_dir)?;
        tracing::info!(
            "Document store opened at {} with {} documents",
            storage_dir.display(),
            documents.len()
        );

        Ok(Self {
            storage_dir,
            documents: Mutex::new(documents),
        })
    }

    /// Directory holding the `{doc_id}.pdf` files
    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    /// Store uploaded bytes as a new document.
    ///
    /// Content that does not parse as a PDF is rejected and nothing is kept.
    pub fn register(&self, content: &[u8], suggested_name: Option<&str>) -> DocumentResult<DocumentMeta> {
        let doc_id = Uuid::new_v4().to_string();
        let name = match suggested_name.map(sanitize_name) {
            Some(name) if !name.is_empty() => name,
            _ => format!("document-{}.pdf", doc_id),
        };

        let meta = self
            .persist(doc_id, name, |out| Ok(out.write_all(content)?))
            .map_err(|e| match e {
                DocumentError::ParseError(detail) => {
                    DocumentError::invalid(format!("Uploaded file is not a valid PDF: {}", detail))
                }
                other => other,
            })?;

        tracing::info!("Registered upload '{}' as {} ({} pages)", meta.name, meta.doc_id, meta.pages);
        Ok(meta)
    }

    /// Persist a document produced by an operation under a fresh identifier.
    ///
    /// `desired_name` only sets the display name; the identifier is always
    /// generated here.
    pub fn store_derived<F>(&self, write: F, desired_name: Option<&str>) -> DocumentResult<DocumentMeta>
    where
        F: FnOnce(&mut dyn Write) -> DocumentResult<()>,
    {
        let doc_id = Uuid::new_v4().to_string();
        let name = match desired_name.map(sanitize_name) {
            Some(name) if !name.is_empty() => name,
            _ => format!("{}.pdf", doc_id),
        };

        let meta = self.persist(doc_id, name, write)?;
        tracing::info!("Stored derived document {} ({} pages)", meta.doc_id, meta.pages);
        Ok(meta)
    }

    /// Fetch metadata for a document
    pub fn get(&self, doc_id: &str) -> DocumentResult<DocumentMeta> {
        self.documents
            .lock()
            .get(doc_id)
            .cloned()
            .ok_or_else(|| DocumentError::NotFound(doc_id.to_string()))
    }

    /// All documents in registration order
    pub fn list(&self) -> Vec<DocumentMeta> {
        self.documents.lock().values().cloned().collect()
    }

    /// Number of registered documents
    pub fn len(&self) -> usize {
        self.documents.lock().len()
    }

    /// Whether the store holds no documents
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove a document and its backing file
    pub fn delete(&self, doc_id: &str) -> DocumentResult<()> {
        let meta = self
            .documents
            .lock()
            .shift_remove(doc_id)
            .ok_or_else(|| DocumentError::NotFound(doc_id.to_string()))?;

        match fs::remove_file(&meta.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("Backing file for {} was already gone", doc_id);
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!("Deleted document {}", doc_id);
        Ok(())
    }

    /// Write to `{doc_id}.pdf.part`, read the page count back, then move the
    /// file into place and register it. Any failure removes the partial file.
    fn persist<F>(&self, doc_id: String, name: String, write: F) -> DocumentResult<DocumentMeta>
    where
        F: FnOnce(&mut dyn Write) -> DocumentResult<()>,
    {
        let path = self.storage_dir.join(format!("{}.pdf", doc_id));
        let partial = path.with_extension(format!("pdf.{}", PARTIAL_SUFFIX));

        let pages = match write_partial(&partial, write) {
            Ok(pages) => pages,
            Err(e) => {
                if let Err(cleanup) = fs::remove_file(&partial) {
                    tracing::debug!("No partial file to clean up for {}: {}", doc_id, cleanup);
                }
                return Err(e);
            }
        };

        if let Err(e) = fs::rename(&partial, &path) {
            let _ = fs::remove_file(&partial);
            return Err(e.into());
        }

        let meta = DocumentMeta {
            doc_id: doc_id.clone(),
            name,
            path,
            pages,
        };
        self.documents.lock().insert(doc_id, meta.clone());
        Ok(meta)
    }
}

fn write_partial<F>(partial: &Path, write: F) -> DocumentResult<usize>
where
    F: FnOnce(&mut dyn Write) -> DocumentResult<()>,
{
    let mut out = BufWriter::new(File::create(partial)?);
    write(&mut out)?;
    out.into_inner()
        .map_err(|e| DocumentError::IoError(e.into_error()))?
        .sync_all()?;

    let pages = pdf::page_count(partial)?;
    if pages == 0 {
        return Err(DocumentError::invalid("Document has no pages"));
    }
    Ok(pages)
}
