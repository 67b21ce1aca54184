use image::RgbaImage;
use pdfium_render::prelude::*;
use tracing::debug;

use super::PreviewError;

/// Turns a PDF into one bitmap per page, in page order.
///
/// Implementations are synchronous and CPU-bound; callers run them on the
/// blocking pool. A failure on any page fails the whole document.
pub trait PageRasterizer: Send + Sync {
    fn rasterize(&self, pdf: &[u8]) -> Result<Vec<RgbaImage>, PreviewError>;
}

/// Renders pages with the pdfium library.
///
/// Binds the library per document so no pdfium handle has to cross threads.
pub struct PdfiumRasterizer {
    /// Directory holding the platform pdfium library. `None` binds the
    /// system-wide library.
    library_path: Option<String>,
    scale: f32,
}

impl PdfiumRasterizer {
    pub fn new(library_path: Option<String>, scale: f32) -> Self {
        Self {
            library_path,
            scale,
        }
    }

    fn bind(&self) -> Result<Pdfium, PreviewError> {
        let bindings = match &self.library_path {
            Some(path) => {
                Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(path))
            }
            None => Pdfium::bind_to_system_library(),
        }
        .map_err(|e| PreviewError::Engine(format!("{e:?}")))?;

        Ok(Pdfium::new(bindings))
    }
}

impl PageRasterizer for PdfiumRasterizer {
    fn rasterize(&self, pdf: &[u8]) -> Result<Vec<RgbaImage>, PreviewError> {
        let pdfium = self.bind()?;
        let document = pdfium
            .load_pdf_from_byte_slice(pdf, None)
            .map_err(|e| PreviewError::Document(format!("{e:?}")))?;

        let render_config = PdfRenderConfig::new().scale_page_by_factor(self.scale);
        let mut images = Vec::new();

        for (index, page) in document.pages().iter().enumerate() {
            let page_number = index + 1;
            let bitmap = page
                .render_with_config(&render_config)
                .map_err(|e| PreviewError::Page {
                    page: page_number,
                    reason: format!("{e:?}"),
                })?;

            let (width, height) = (bitmap.width() as u32, bitmap.height() as u32);
            let image = RgbaImage::from_raw(width, height, bitmap.as_rgba_bytes()).ok_or_else(
                || PreviewError::Page {
                    page: page_number,
                    reason: format!("bitmap does not fit {width}x{height}"),
                },
            )?;

            debug!("Rendered page {page_number} at {width}x{height}");
            images.push(image);
        }

        Ok(images)
    }
}
