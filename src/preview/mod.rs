//! Page previews
//!
//! Renders a window of pages to small PNGs returned inline as data URIs.
//! Rendering is a capability: it needs the `render` feature (MuPDF) and
//! must be enabled in config. Without it every preview request fails with
//! [`DocumentError::Unavailable`].
//!
//! Only the pages inside the requested window are rasterized, and nothing
//! is cached between calls.

#[cfg(feature = "render")]
mod raster;

use std::ops::Range;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::config::PreviewConfig;
use crate::document::{DocumentError, DocumentResult, PagePreview, PreviewPage};

/// Maximum scale factor accepted from config (matches the rasterizer limits)
const MAX_SCALE: f32 = 4.0;
/// Minimum scale factor accepted from config
const MIN_SCALE: f32 = 0.1;

/// Preview renderer with a fixed, reduced scale
#[derive(Debug, Clone)]
pub struct PreviewRenderer {
    scale: f32,
    enabled: bool,
}

impl PreviewRenderer {
    /// Build from config; the renderer is only available when MuPDF is
    /// compiled in and previews are enabled.
    pub fn new(config: &PreviewConfig) -> Self {
        let enabled = cfg!(feature = "render") && config.enabled;
        if config.enabled && !enabled {
            tracing::warn!("Previews requested but the server was built without the `render` feature");
        }

        Self {
            scale: config.scale.clamp(MIN_SCALE, MAX_SCALE),
            enabled,
        }
    }

    /// Renderer that always reports `Unavailable`
    pub fn disabled() -> Self {
        Self {
            scale: PreviewConfig::default().scale,
            enabled: false,
        }
    }

    /// Whether page rendering can be performed
    pub fn is_available(&self) -> bool {
        self.enabled
    }

    /// Scale factor applied to every page
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Render the window `[offset, offset + limit)` of the PDF at `path`
    pub fn render_window(
        &self,
        path: &Path,
        offset: usize,
        limit: Option<usize>,
    ) -> DocumentResult<PreviewPage> {
        if !self.enabled {
            return Err(DocumentError::Unavailable(
                "Page previews are not available on this server".into(),
            ));
        }
        self.render_enabled(path, offset, limit)
    }

    #[cfg(feature = "render")]
    fn render_enabled(
        &self,
        path: &Path,
        offset: usize,
        limit: Option<usize>,
    ) -> DocumentResult<PreviewPage> {
        let rasterizer = raster::Rasterizer::open(path)?;
        let total_pages = rasterizer.page_count()?;
        let window = preview_window(total_pages, offset, limit);

        tracing::debug!(
            "Rendering previews {:?} of {} ({} pages) at scale {}",
            window,
            path.display(),
            total_pages,
            self.scale
        );

        let pages = rasterizer
            .previews(window, self.scale)
            .collect::<DocumentResult<Vec<_>>>()?;

        Ok(PreviewPage { pages, total_pages })
    }

    #[cfg(not(feature = "render"))]
    fn render_enabled(
        &self,
        _path: &Path,
        _offset: usize,
        _limit: Option<usize>,
    ) -> DocumentResult<PreviewPage> {
        Err(DocumentError::Unavailable(
            "Page previews are not available on this server".into(),
        ))
    }
}

/// 0-based page indices to render for a window request.
///
/// The start is clamped to `total`, so an offset past the end yields an
/// empty window; a limit past the end yields the remaining pages.
pub fn preview_window(total: usize, offset: usize, limit: Option<usize>) -> Range<usize> {
    let start = offset.min(total);
    let end = match limit {
        Some(limit) => total.min(offset.saturating_add(limit)),
        None => total,
    };
    start..end.max(start)
}

/// Wrap PNG bytes in a `data:` URI
pub fn png_data_uri(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", BASE64.encode(png))
}

/// Pair a rendered PNG with its 1-based page number
pub(crate) fn page_preview(index: usize, png: &[u8]) -> PagePreview {
    PagePreview {
        index: index + 1,
        image: png_data_uri(png),
    }
}
