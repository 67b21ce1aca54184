//! In-memory `FlowRunner` used by unit and router tests.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::tweaks::Tweaks;
use super::{FlowError, FlowRequest, FlowRunner, RunResponse};

/// A request as seen by the stub, owned so tests can inspect it afterwards.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub flow: String,
    pub session_id: String,
    pub fallback_to_env_vars: bool,
    pub tweaks: Tweaks,
    pub input_value: String,
}

enum Reply {
    Outputs(Value),
    Fail(String),
}

pub struct StubFlowRunner {
    reply: Reply,
    calls: Mutex<Vec<RecordedCall>>,
}

impl StubFlowRunner {
    /// Answers every call with `{"outputs": outputs}`.
    pub fn replying(outputs: Value) -> Self {
        Self {
            reply: Reply::Outputs(outputs),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fails every call with a 500 carrying `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            reply: Reply::Fail(message.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FlowRunner for StubFlowRunner {
    async fn run(&self, request: FlowRequest<'_>) -> Result<RunResponse, FlowError> {
        self.calls.lock().unwrap().push(RecordedCall {
            flow: request.flow.to_string(),
            session_id: request.session_id.to_string(),
            fallback_to_env_vars: request.fallback_to_env_vars,
            tweaks: request.tweaks.clone(),
            input_value: request.input_value.to_string(),
        });

        match &self.reply {
            Reply::Outputs(outputs) => Ok(RunResponse {
                session_id: None,
                outputs: outputs.clone(),
            }),
            Reply::Fail(message) => Err(FlowError::Api {
                status: 500,
                message: message.clone(),
            }),
        }
    }
}
