/// Flow Client — the single point of entry for all flow-engine calls.
///
/// ARCHITECTURAL RULE: No other module may talk to Langflow directly.
/// Handlers go through `run_flow`, which always yields a displayable string.
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

pub mod catalog;
#[cfg(test)]
pub mod mock;
pub mod tweaks;

use catalog::{FlowCatalog, FlowKind};
use tweaks::Tweaks;

/// Shown when the engine answers with no result objects.
pub const NO_RESULTS_MESSAGE: &str = "No results returned or unexpected format.";

/// Environment variable consulted when no API key is configured and the
/// request allows falling back to the environment.
pub const API_KEY_ENV: &str = "LANGFLOW_API_KEY";

const MESSAGE_RESULT_KEY: &str = "message";

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid flow definition '{flow}': {reason}")]
    Definition { flow: String, reason: String },

    #[error("invalid Langflow URL '{0}'")]
    InvalidUrl(String),

    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),
}

/// One invocation of a named flow.
#[derive(Debug, Clone, Copy)]
pub struct FlowRequest<'a> {
    /// File name of the flow export, e.g. `Resume Analysis.json`.
    pub flow: &'a str,
    /// Empty means "let the engine start a fresh session".
    pub session_id: &'a str,
    pub fallback_to_env_vars: bool,
    pub tweaks: &'a Tweaks,
    pub input_value: &'a str,
}

/// Raw engine answer. `outputs` is kept untyped so a malformed answer can be
/// told apart from an empty one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunResponse {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub outputs: Value,
}

#[derive(Debug, Deserialize)]
struct RunOutputs {
    outputs: Vec<ResultData>,
}

#[derive(Debug, Deserialize)]
struct ResultData {
    results: HashMap<String, Value>,
}

#[derive(Debug, Deserialize)]
struct MessagePayload {
    #[serde(default)]
    data: Option<MessageData>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MessageData {
    #[serde(default)]
    text: Option<String>,
}

/// Executes flows on an external engine. Carried in `AppState` as
/// `Arc<dyn FlowRunner>` so tests can substitute a stub.
#[async_trait]
pub trait FlowRunner: Send + Sync {
    async fn run(&self, request: FlowRequest<'_>) -> Result<RunResponse, FlowError>;
}

/// Pulls `outputs[0].outputs[0].results["message"].data.text` out of an
/// engine answer.
///
/// Returns `Ok(None)` when there is nothing to read (not a list, or an empty
/// list) and `UnexpectedShape` when a result exists but the chain breaks.
pub fn first_message_text(outputs: &Value) -> Result<Option<String>, FlowError> {
    let Some(first) = outputs.as_array().and_then(|results| results.first()) else {
        return Ok(None);
    };

    let run_outputs = RunOutputs::deserialize(first)
        .map_err(|e| FlowError::UnexpectedShape(format!("first result: {e}")))?;

    let output = run_outputs
        .outputs
        .into_iter()
        .next()
        .ok_or_else(|| FlowError::UnexpectedShape("first result has no outputs".to_string()))?;

    let message = output.results.get(MESSAGE_RESULT_KEY).ok_or_else(|| {
        FlowError::UnexpectedShape("first output has no 'message' result".to_string())
    })?;

    let payload = MessagePayload::deserialize(message)
        .map_err(|e| FlowError::UnexpectedShape(format!("message result: {e}")))?;

    payload
        .data
        .and_then(|data| data.text)
        .or(payload.text)
        .map(Some)
        .ok_or_else(|| FlowError::UnexpectedShape("message has no 'text' field".to_string()))
}

/// Runs `flow` and converts every outcome into the string shown to the user.
/// Never fails: errors are folded into `An error occurred: ...`.
pub async fn run_flow(
    runner: &dyn FlowRunner,
    flow: FlowKind,
    tweaks: &Tweaks,
    input_value: &str,
) -> String {
    let request = FlowRequest {
        flow: flow.file_name(),
        session_id: "",
        fallback_to_env_vars: true,
        tweaks,
        input_value,
    };

    let outcome = runner
        .run(request)
        .await
        .and_then(|response| first_message_text(&response.outputs));

    match outcome {
        Ok(Some(text)) => text,
        Ok(None) => {
            warn!("Flow '{}' returned no results", flow.file_name());
            NO_RESULTS_MESSAGE.to_string()
        }
        Err(e) => {
            warn!("Flow '{}' failed: {e}", flow.file_name());
            format!("An error occurred: {e}")
        }
    }
}

#[derive(Debug, Serialize)]
struct RunRequestBody<'a> {
    input_value: &'a str,
    input_type: &'static str,
    output_type: &'static str,
    tweaks: &'a Tweaks,
    #[serde(skip_serializing_if = "Option::is_none")]
    session_id: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct LangflowError {
    detail: Value,
}

/// Reads one environment variable. Swappable so tests need not touch the
/// process environment.
pub type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Langflow REST binding: `POST /api/v1/run/{flow}`.
#[derive(Clone)]
pub struct LangflowClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    catalog: FlowCatalog,
    env_lookup: EnvLookup,
}

impl LangflowClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        catalog: FlowCatalog,
        timeout: Duration,
    ) -> Result<Self, FlowError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.into(),
            api_key,
            catalog,
            env_lookup: Arc::new(|key: &str| std::env::var(key).ok()),
        })
    }

    pub fn with_env_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.env_lookup = Arc::new(lookup);
        self
    }

    fn run_url(&self, flow_ref: &str) -> Result<Url, FlowError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|_| FlowError::InvalidUrl(self.base_url.clone()))?;
        url.path_segments_mut()
            .map_err(|_| FlowError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(["api", "v1", "run", flow_ref]);
        url.query_pairs_mut().append_pair("stream", "false");
        Ok(url)
    }

    fn resolve_api_key(&self, fallback_to_env_vars: bool) -> Option<String> {
        self.api_key.clone().or_else(|| {
            fallback_to_env_vars
                .then(|| (self.env_lookup)(API_KEY_ENV))
                .flatten()
                .filter(|key| !key.trim().is_empty())
        })
    }
}

#[async_trait]
impl FlowRunner for LangflowClient {
    async fn run(&self, request: FlowRequest<'_>) -> Result<RunResponse, FlowError> {
        let flow_ref = self.catalog.resolve(request.flow).await?;
        let url = self.run_url(&flow_ref)?;

        info!(
            "Running flow '{}' ({}) with {} chars of input",
            request.flow,
            flow_ref,
            request.input_value.chars().count()
        );

        let body = RunRequestBody {
            input_value: request.input_value,
            input_type: "chat",
            output_type: "chat",
            tweaks: request.tweaks,
            session_id: Some(request.session_id).filter(|id| !id.is_empty()),
        };

        let mut call = self.client.post(url).json(&body);
        if let Some(key) = self.resolve_api_key(request.fallback_to_env_vars) {
            call = call.header("x-api-key", key);
        }

        let response = call.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<LangflowError>(&body)
                .map(|e| match e.detail {
                    Value::String(detail) => detail,
                    other => other.to_string(),
                })
                .unwrap_or(body);
            return Err(FlowError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let run_response: RunResponse = serde_json::from_str(&response.text().await?)?;

        debug!(
            "Flow '{}' succeeded: session_id={:?}",
            request.flow, run_response.session_id
        );

        Ok(run_response)
    }
}
