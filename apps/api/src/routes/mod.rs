pub mod feedback;
pub mod health;
pub mod ui;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::preview::handlers::handle_preview;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/", get(ui::index_handler))
        .route("/health", get(health::health_handler))
        .route("/api/v1/preview", post(handle_preview))
        .route("/api/v1/analyze", post(handlers::handle_analyze))
        .route("/api/v1/match", post(handlers::handle_match))
        .route("/api/v1/feedback", post(feedback::feedback_handler))
        .layer(body_limit)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::flow_client::mock::StubFlowRunner;
    use crate::preview::tests::{FailingRasterizer, StubRasterizer, MINIMAL_PDF};

    const BOUNDARY: &str = "ats-test-boundary";

    enum Part<'a> {
        Text(&'a str, &'a str),
        File(&'a str, &'a str, &'a [u8]),
    }

    fn multipart(parts: &[Part<'_>]) -> Request<Body> {
        multipart_to("/api/v1/analyze", parts)
    }

    fn multipart_to(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n")
                            .as_bytes(),
                    );
                    body.extend_from_slice(value.as_bytes());
                }
                Part::File(name, file_name, bytes) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                             Content-Type: application/pdf\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(bytes);
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::post(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn reply(text: &str) -> Arc<StubFlowRunner> {
        Arc::new(StubFlowRunner::replying(json!([{
            "outputs": [{"results": {"message": {"data": {"text": text}}}}]
        }])))
    }

    fn app(runner: Arc<StubFlowRunner>, pages: usize) -> Router {
        build_router(AppState::new(
            Config::default(),
            runner,
            Arc::new(StubRasterizer { pages }),
        ))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_index_serves_form() {
        let response = app(reply("x"), 1)
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("ATS Resume Checker"));
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::get("/health").body(Body::empty()).unwrap();
        let (status, body) = send(app(reply("x"), 1), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_analyze_without_resume_returns_validation_message() {
        let runner = reply("unused");
        let (status, body) = send(app(runner.clone(), 1), multipart(&[])).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Please upload a resume to analyze.");
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_part_without_chosen_file_counts_as_no_resume() {
        let runner = reply("unused");
        let request = multipart(&[Part::File("resume", "", b"")]);
        let (status, body) = send(app(runner.clone(), 1), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Please upload a resume to analyze.");
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_zero_byte_pdf_is_still_analyzed() {
        let runner = reply("Empty resume.");
        let request = multipart(&[Part::File("resume", "blank.pdf", b"")]);
        let (status, body) = send(app(runner.clone(), 1), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["output"], "Empty resume.");
        assert_eq!(runner.calls()[0].input_value, "");
    }

    #[tokio::test]
    async fn test_match_with_blank_job_description_runs_flow() {
        let runner = reply("5% match");
        let request = multipart_to(
            "/api/v1/match",
            &[
                Part::File("resume", "jane.pdf", MINIMAL_PDF),
                Part::Text("job_description", "  "),
            ],
        );
        let (status, body) = send(app(runner.clone(), 1), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["output"], "5% match");
        assert_eq!(runner.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_analyze_returns_flow_output() {
        let runner = reply("Solid backend profile.");
        let request = multipart(&[Part::File("resume", "jane.pdf", MINIMAL_PDF)]);
        let (status, body) = send(app(runner.clone(), 1), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["heading"], "Resume Analysis Output:");
        assert_eq!(body["output"], "Solid backend profile.");
        assert_eq!(runner.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_match_with_empty_job_description_is_rejected() {
        let runner = reply("unused");
        let request = multipart_to(
            "/api/v1/match",
            &[
                Part::File("resume", "jane.pdf", MINIMAL_PDF),
                Part::Text("job_description", ""),
            ],
        );
        let (status, body) = send(app(runner.clone(), 1), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"]["message"],
            "Please upload a resume and enter a job description."
        );
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_match_returns_percentage_verbatim() {
        let runner = reply("42% match");
        let request = multipart_to(
            "/api/v1/match",
            &[
                Part::Text("job_description", "Senior Rust engineer"),
                Part::File("resume", "jane.pdf", MINIMAL_PDF),
            ],
        );
        let (status, body) = send(app(runner.clone(), 1), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["heading"], "Percentage Match Output:");
        assert_eq!(body["output"], "42% match");
        assert!(runner.calls()[0]
            .input_value
            .starts_with("Job Description:\nSenior Rust engineer\n\nResume Content:\n"));
    }

    #[tokio::test]
    async fn test_non_pdf_upload_is_rejected() {
        let runner = reply("unused");
        let request = multipart(&[Part::File("resume", "cv.docx", b"PK\x03\x04")]);
        let request = {
            // Same body, but without the PDF content type.
            let (parts, body) = request.into_parts();
            let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
            let patched = String::from_utf8_lossy(&bytes)
                .replace("Content-Type: application/pdf", "Content-Type: application/zip");
            Request::from_parts(parts, Body::from(patched))
        };
        let (status, body) = send(app(runner.clone(), 1), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Only PDF files are accepted.");
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_preview_returns_all_pages_at_default_zoom() {
        let request = multipart_to(
            "/api/v1/preview",
            &[Part::File("resume", "jane.pdf", MINIMAL_PDF)],
        );
        let (status, body) = send(app(reply("x"), 3), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["page_count"], 3);
        assert_eq!(body["display_width"], 700);
        let numbers: Vec<u64> = body["pages"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["page_number"].as_u64().unwrap())
            .collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_preview_display_width_follows_zoom() {
        let request = multipart_to(
            "/api/v1/preview",
            &[
                Part::Text("zoom", "450"),
                Part::File("resume", "jane.pdf", MINIMAL_PDF),
            ],
        );
        let (status, body) = send(app(reply("x"), 1), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["display_width"], 450);
    }

    #[tokio::test]
    async fn test_preview_rejects_off_step_zoom() {
        let request = multipart_to(
            "/api/v1/preview",
            &[
                Part::Text("zoom", "725"),
                Part::File("resume", "jane.pdf", MINIMAL_PDF),
            ],
        );
        let (status, _) = send(app(reply("x"), 1), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_preview_of_corrupt_pdf_shows_error_and_no_pages() {
        let app = build_router(AppState::new(
            Config::default(),
            reply("x"),
            Arc::new(FailingRasterizer { ok_pages: 1 }),
        ));
        let request = multipart_to(
            "/api/v1/preview",
            &[Part::File("resume", "jane.pdf", MINIMAL_PDF)],
        );
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Error processing PDF: "));
        assert!(body.get("pages").is_none());
    }

    #[tokio::test]
    async fn test_feedback_always_thanks() {
        let request = Request::post("/api/v1/feedback")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"feedback": "Love it"}).to_string()))
            .unwrap();
        let (status, body) = send(app(reply("x"), 1), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Thank you for your feedback!");
    }
}
