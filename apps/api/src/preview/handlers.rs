use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::upload::ResumeForm;
use crate::preview::zoom::{ZoomLevel, MAX_WIDTH, MIN_WIDTH, STEP};
use crate::preview::{render_preview, PageImage};
use crate::state::AppState;

pub const NO_FILE_MESSAGE: &str = "Please upload a resume to preview.";

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub page_count: usize,
    /// Width every page is displayed at; equals the zoom slider value.
    pub display_width: ZoomLevel,
    pub pages: Vec<PageImage>,
}

/// POST /api/v1/preview
///
/// Form data: `resume` (PDF), optional `zoom`.
pub async fn handle_preview(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<PreviewResponse>, AppError> {
    let form = ResumeForm::from_multipart(multipart).await?;

    let display_width = ZoomLevel::parse(form.zoom.as_deref()).ok_or_else(|| {
        AppError::Validation(format!(
            "Zoom level must be between {MIN_WIDTH} and {MAX_WIDTH} in steps of {STEP}."
        ))
    })?;

    let resume = form
        .resume
        .ok_or_else(|| AppError::Validation(NO_FILE_MESSAGE.to_string()))?;

    let pages = render_preview(state.rasterizer.clone(), resume.bytes)
        .await
        .map_err(|e| {
            warn!("Preview of '{}' failed: {e}", resume.file_name);
            AppError::UnprocessableEntity(format!("Error processing PDF: {e}"))
        })?;

    info!(
        "Rendered {} page(s) of '{}' for preview at {}px",
        pages.len(),
        resume.file_name,
        display_width.width()
    );

    Ok(Json(PreviewResponse {
        page_count: pages.len(),
        display_width,
        pages,
    }))
}
