//! PDF preview — renders every page of an uploaded résumé to a PNG the page
//! can display at the chosen zoom.

use std::io::Cursor;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;
use image::{ImageFormat, RgbaImage};
use serde::Serialize;
use thiserror::Error;

pub mod handlers;
pub mod rasterizer;
pub mod zoom;

use rasterizer::PageRasterizer;

const PDF_MAGIC: &[u8] = b"%PDF-";
/// PDF readers accept the header anywhere in this many leading bytes.
const HEADER_WINDOW: usize = 1024;

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("file is not a PDF")]
    NotAPdf,

    #[error("PDF engine unavailable: {0}")]
    Engine(String),

    #[error("cannot open document: {0}")]
    Document(String),

    #[error("cannot render page {page}: {reason}")]
    Page { page: usize, reason: String },

    #[error("cannot encode page image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("render task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// One rendered page, ready to drop into an `<img src>`.
#[derive(Debug, Clone, Serialize)]
pub struct PageImage {
    /// 1-based.
    pub page_number: usize,
    pub width: u32,
    pub height: u32,
    pub data_uri: String,
}

impl PageImage {
    fn encode(page_number: usize, image: &RgbaImage) -> Result<Self, PreviewError> {
        let mut png = Cursor::new(Vec::new());
        image.write_to(&mut png, ImageFormat::Png)?;

        Ok(PageImage {
            page_number,
            width: image.width(),
            height: image.height(),
            data_uri: format!("data:image/png;base64,{}", STANDARD.encode(png.into_inner())),
        })
    }
}

/// Rejects uploads with no PDF header in the first `HEADER_WINDOW` bytes.
pub fn ensure_pdf_header(bytes: &[u8]) -> Result<(), PreviewError> {
    let head = &bytes[..bytes.len().min(HEADER_WINDOW)];
    if head.windows(PDF_MAGIC.len()).any(|w| w == PDF_MAGIC) {
        Ok(())
    } else {
        Err(PreviewError::NotAPdf)
    }
}

/// Renders all pages of `pdf` in order.
///
/// All-or-nothing: if any page fails, pages already rendered are dropped and
/// only the error is returned.
pub async fn render_preview(
    rasterizer: Arc<dyn PageRasterizer>,
    pdf: Bytes,
) -> Result<Vec<PageImage>, PreviewError> {
    ensure_pdf_header(&pdf)?;

    tokio::task::spawn_blocking(move || -> Result<Vec<PageImage>, PreviewError> {
        rasterizer
            .rasterize(&pdf)?
            .iter()
            .enumerate()
            .map(|(index, image)| PageImage::encode(index + 1, image))
            .collect()
    })
    .await?
}
