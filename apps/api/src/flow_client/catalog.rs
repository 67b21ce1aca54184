//! Flow catalog — maps the two fixed flow exports to the identifier the
//! Langflow server knows them by.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use super::FlowError;

/// The two pipelines the checker can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowKind {
    ResumeAnalysis,
    PercentageMatch,
}

impl FlowKind {
    pub const ALL: [FlowKind; 2] = [FlowKind::ResumeAnalysis, FlowKind::PercentageMatch];

    /// File name of the exported flow inside the flows directory.
    pub fn file_name(self) -> &'static str {
        match self {
            FlowKind::ResumeAnalysis => "Resume Analysis.json",
            FlowKind::PercentageMatch => "Percentage Match.json",
        }
    }
}

/// Subset of a Langflow export we care about.
#[derive(Debug, Deserialize)]
struct FlowDefinition {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    endpoint_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FlowCatalog {
    dir: PathBuf,
}

impl FlowCatalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Loads `flow` from disk and returns its endpoint name, or its id when no
    /// endpoint name is set. Read on every call so edited exports take effect
    /// without a restart.
    pub async fn resolve(&self, flow: &str) -> Result<String, FlowError> {
        let definition_error = |reason: String| FlowError::Definition {
            flow: flow.to_string(),
            reason,
        };

        if Path::new(flow).file_name().and_then(|n| n.to_str()) != Some(flow) {
            return Err(definition_error("flow name must be a plain file name".to_string()));
        }

        let path = self.dir.join(flow);
        let raw = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| definition_error(format!("cannot read {}: {e}", path.display())))?;
        let definition: FlowDefinition = serde_json::from_str(&raw)
            .map_err(|e| definition_error(format!("not a flow export: {e}")))?;

        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        let flow_ref = non_empty(definition.endpoint_name)
            .or_else(|| non_empty(definition.id))
            .ok_or_else(|| definition_error("export has neither 'endpoint_name' nor 'id'".to_string()))?;

        debug!("Resolved flow '{flow}' to '{flow_ref}'");
        Ok(flow_ref)
    }

    /// Startup check: logs every flow export that cannot be resolved.
    /// Returns how many resolved.
    pub async fn check(&self) -> usize {
        let mut resolved = 0;
        for kind in FlowKind::ALL {
            match self.resolve(kind.file_name()).await {
                Ok(_) => resolved += 1,
                Err(e) => warn!("{e}"),
            }
        }
        resolved
    }
}
