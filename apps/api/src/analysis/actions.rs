//! The two buttons of the form. Each press is an independent request:
//! check preconditions → build input → run one flow → return its text.

use serde::Serialize;
use tracing::{info, warn};

use crate::analysis::prompts::{
    ANALYZE_FAILURE_PREFIX, ANALYZE_MISSING_INPUT, JOB_DESCRIPTION_LABEL, MATCH_FAILURE_PREFIX,
    MATCH_MISSING_INPUT, PERCENTAGE_MATCH_HEADING, PERCENTAGE_MATCH_TEMPLATE,
    RESUME_ANALYSIS_HEADING, RESUME_ANALYSIS_TEMPLATE, RESUME_CONTENT_LABEL,
};
use crate::analysis::resume_text::resume_text;
use crate::config::ResumeTextMode;
use crate::errors::AppError;
use crate::flow_client::catalog::FlowKind;
use crate::flow_client::tweaks::Tweaks;
use crate::flow_client::{run_flow, FlowRunner};
use crate::models::upload::UploadedFile;

/// What the page shows under an action button.
#[derive(Debug, Clone, Serialize)]
pub struct ActionOutput {
    pub heading: String,
    pub output: String,
}

/// Collaborators shared by both actions.
#[derive(Clone, Copy)]
pub struct ActionContext<'a> {
    pub runner: &'a dyn FlowRunner,
    pub base_tweaks: &'a Tweaks,
    pub text_mode: ResumeTextMode,
}

/// Combined input for the match flow.
pub fn build_match_input(job_description: &str, resume_content: &str) -> String {
    format!("{JOB_DESCRIPTION_LABEL}\n{job_description}\n\n{RESUME_CONTENT_LABEL}\n{resume_content}")
}

/// "Tell About the Resume": runs the resume-analysis flow on the résumé text.
pub async fn analyze_resume(
    ctx: ActionContext<'_>,
    resume: Option<&UploadedFile>,
) -> Result<ActionOutput, AppError> {
    let resume = resume.ok_or_else(|| AppError::Validation(ANALYZE_MISSING_INPUT.to_string()))?;

    let content = resume_text(ctx.text_mode, resume.bytes.clone())
        .await
        .map_err(|e| {
            warn!("Could not read '{}': {e}", resume.file_name);
            AppError::UnprocessableEntity(format!("{ANALYZE_FAILURE_PREFIX}: {e}"))
        })?;

    info!("Analyzing resume '{}'", resume.file_name);

    let tweaks = ctx.base_tweaks.with_prompt(RESUME_ANALYSIS_TEMPLATE);
    let output = run_flow(ctx.runner, FlowKind::ResumeAnalysis, &tweaks, &content).await;

    Ok(ActionOutput {
        heading: RESUME_ANALYSIS_HEADING.to_string(),
        output,
    })
}

/// "Percentage Match": runs the percentage-match flow on job description
/// plus résumé text.
pub async fn match_resume(
    ctx: ActionContext<'_>,
    resume: Option<&UploadedFile>,
    job_description: &str,
) -> Result<ActionOutput, AppError> {
    let resume = match resume {
        Some(resume) if !job_description.is_empty() => resume,
        _ => return Err(AppError::Validation(MATCH_MISSING_INPUT.to_string())),
    };

    let content = resume_text(ctx.text_mode, resume.bytes.clone())
        .await
        .map_err(|e| {
            warn!("Could not read '{}': {e}", resume.file_name);
            AppError::UnprocessableEntity(format!("{MATCH_FAILURE_PREFIX}: {e}"))
        })?;

    info!(
        "Matching resume '{}' against a {}-char job description",
        resume.file_name,
        job_description.chars().count()
    );

    let input = build_match_input(job_description, &content);
    let tweaks = ctx.base_tweaks.with_prompt(PERCENTAGE_MATCH_TEMPLATE);
    let output = run_flow(ctx.runner, FlowKind::PercentageMatch, &tweaks, &input).await;

    Ok(ActionOutput {
        heading: PERCENTAGE_MATCH_HEADING.to_string(),
        output,
    })
}
