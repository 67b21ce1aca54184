use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

pub const THANK_YOU_MESSAGE: &str = "Thank you for your feedback!";

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    #[serde(default)]
    pub feedback: String,
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub message: &'static str,
}

/// POST /api/v1/feedback
/// Always succeeds. The text is not stored.
pub async fn feedback_handler(Json(request): Json<FeedbackRequest>) -> Json<FeedbackResponse> {
    info!(
        "Feedback received ({} chars)",
        request.feedback.chars().count()
    );
    Json(FeedbackResponse {
        message: THANK_YOU_MESSAGE,
    })
}
