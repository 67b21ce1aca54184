//! Axum route handlers for the two form actions.

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::analysis::actions::{analyze_resume, match_resume, ActionContext, ActionOutput};
use crate::errors::AppError;
use crate::models::upload::ResumeForm;
use crate::state::AppState;

fn action_context(state: &AppState) -> ActionContext<'_> {
    ActionContext {
        runner: state.flow_runner.as_ref(),
        base_tweaks: &state.base_tweaks,
        text_mode: state.config.resume_text_mode,
    }
}

/// POST /api/v1/analyze
///
/// Form data: `resume` (PDF).
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ActionOutput>, AppError> {
    let form = ResumeForm::from_multipart(multipart).await?;
    let output = analyze_resume(action_context(&state), form.resume.as_ref()).await?;
    Ok(Json(output))
}

/// POST /api/v1/match
///
/// Form data: `resume` (PDF), `job_description` (text).
pub async fn handle_match(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ActionOutput>, AppError> {
    let form = ResumeForm::from_multipart(multipart).await?;
    let output = match_resume(
        action_context(&state),
        form.resume.as_ref(),
        &form.job_description,
    )
    .await?;
    Ok(Json(output))
}
