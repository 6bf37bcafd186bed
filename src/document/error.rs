//! Document error types
//!
//! Unified error handling for store lookups, page selection and the PDF
//! engines.

use thiserror::Error;

/// Unified document error type
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Document not found
    #[error("Document {0} not found")]
    NotFound(String),

    /// Malformed page range, empty selection, bad offset/limit, unreadable upload
    #[error("{0}")]
    InvalidArgument(String),

    /// A required capability (page rendering) is not installed or disabled
    #[error("{0}")]
    Unavailable(String),

    /// Failed to parse or serialize a PDF
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Failed to render content
    #[error("Render error: {0}")]
    RenderError(String),

    /// Image processing error
    #[error("Image error: {0}")]
    ImageError(String),

    /// IO error (std::io::Error)
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl DocumentError {
    /// Shorthand for building an `InvalidArgument` from anything displayable
    pub fn invalid(message: impl Into<String>) -> Self {
        DocumentError::InvalidArgument(message.into())
    }
}

/// Result type alias for document operations
pub type Result<T> = std::result::Result<T, DocumentError>;

/// Alias for Result (used by the operations layer)
pub type DocumentResult<T> = Result<T>;

impl From<lopdf::Error> for DocumentError {
    fn from(err: lopdf::Error) -> Self {
        DocumentError::ParseError(err.to_string())
    }
}

#[cfg(feature = "render")]
impl From<mupdf::Error> for DocumentError {
    fn from(err: mupdf::Error) -> Self {
        DocumentError::RenderError(err.to_string())
    }
}

impl From<image::ImageError> for DocumentError {
    fn from(err: image::ImageError) -> Self {
        DocumentError::ImageError(err.to_string())
    }
}
