//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::document::DocumentError;
use crate::preview::PreviewRenderer;
use crate::store::DocumentStore;

/// Error type for state initialization
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("Failed to open document store: {0}")]
    StoreInit(#[from] DocumentError),
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    store: DocumentStore,
    renderer: PreviewRenderer,
}

impl AppState {
    /// Create a new application state
    ///
    /// Scans the storage directory to rebuild the document registry.
    pub fn new(config: Config) -> Result<Self, StateError> {
        let store = DocumentStore::open(&config.storage.dir)?;
        let renderer = PreviewRenderer::new(&config.preview);

        if renderer.is_available() {
            tracing::info!("Page previews enabled at scale {}", renderer.scale());
        } else {
            tracing::warn!("Page previews are unavailable; preview requests will return 503");
        }

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                renderer,
            }),
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the document store
    pub fn store(&self) -> &DocumentStore {
        &self.inner.store
    }

    /// Get the preview renderer
    pub fn renderer(&self) -> &PreviewRenderer {
        &self.inner.renderer
    }
}
