//! MuPDF rasterization
//!
//! Opens the document once per request and renders pages lazily as the
//! caller pulls them from the iterator.

use std::io::Cursor;
use std::ops::Range;
use std::path::Path;

use image::DynamicImage;
use mupdf::{Colorspace, Document, Matrix};

use crate::document::{DocumentError, DocumentResult, PagePreview};

use super::page_preview;

pub(super) struct Rasterizer {
    doc: Document,
}

impl Rasterizer {
    pub(super) fn open(path: &Path) -> DocumentResult<Self> {
        let path_str = path.to_string_lossy();
        let doc = Document::open(&*path_str)?;
        Ok(Self { doc })
    }

    pub(super) fn page_count(&self) -> DocumentResult<usize> {
        Ok(self.doc.page_count()? as usize)
    }

    /// Lazily render each page of `window` to a PNG preview
    pub(super) fn previews(
        &self,
        window: Range<usize>,
        scale: f32,
    ) -> impl Iterator<Item = DocumentResult<PagePreview>> + '_ {
        window.map(move |index| {
            let png = self.render_png(index, scale)?;
            Ok(page_preview(index, &png))
        })
    }

    fn render_png(&self, index: usize, scale: f32) -> DocumentResult<Vec<u8>> {
        let page = self.doc.load_page(index as i32)?;
        let matrix = Matrix::new_scale(scale, scale);
        let colorspace = Colorspace::device_rgb();
        let pixmap = page.to_pixmap(&matrix, &colorspace, false, true)?;
        encode_png(&pixmap)
    }
}

fn encode_png(pixmap: &mupdf::Pixmap) -> DocumentResult<Vec<u8>> {
    let width = pixmap.width() as u32;
    let height = pixmap.height() as u32;
    let samples = pixmap.samples();
    let n = pixmap.n() as usize;

    // Convert to RGBA buffer
    let mut rgba_buffer = Vec::with_capacity((width * height * 4) as usize);

    for y in 0..height as usize {
        for x in 0..width as usize {
            let offset = (y * width as usize + x) * n;
            let r = samples.get(offset).copied().unwrap_or(0);
            let g = samples.get(offset + 1).copied().unwrap_or(0);
            let b = samples.get(offset + 2).copied().unwrap_or(0);
            let a = if n >= 4 {
                samples.get(offset + 3).copied().unwrap_or(255)
            } else {
                255
            };
            rgba_buffer.extend_from_slice(&[r, g, b, a]);
        }
    }

    let img = image::RgbaImage::from_raw(width, height, rgba_buffer)
        .ok_or_else(|| DocumentError::ImageError("Failed to create image buffer".to_string()))?;

    let mut output = Vec::new();
    DynamicImage::ImageRgba8(img).write_to(&mut Cursor::new(&mut output), image::ImageFormat::Png)?;
    Ok(output)
}
