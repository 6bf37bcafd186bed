//! Document model
//!
//! Metadata and error types shared by the store, the PDF engines and the
//! HTTP layer.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                    DocumentStore                        │
//! │     (id → DocumentMeta registry over {id}.pdf files)    │
//! └─────────────────────────────────────────────────────────┘
//!                            │
//!           ┌────────────────┼────────────────┐
//!           ▼                ▼                ▼
//!   ┌──────────────┐ ┌──────────────┐ ┌──────────────┐
//!   │    slice     │ │    merge     │ │    rotate    │
//!   │              │ │              │ │              │
//!   └──────────────┘ └──────────────┘ └──────────────┘
//!           │                │                │
//!           └────────────────┼────────────────┘
//!                            ▼
//!   ┌─────────────────────────────────────────────────────┐
//!   │       pdf (lopdf editing) / preview (MuPDF)         │
//!   └─────────────────────────────────────────────────────┘
//! ```

mod error;
mod types;

pub use error::{DocumentError, DocumentResult, Result};
pub use types::{sanitize_name, DocumentMeta, PagePreview, PreviewPage};
