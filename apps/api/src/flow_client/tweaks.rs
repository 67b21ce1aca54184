//! Tweaks — per-component option overrides sent with every flow run.
//!
//! Shape: component name → option name → value. Built once per request by
//! overlaying the flow's `Prompt` component onto the shared base mapping.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::Config;

pub const CHROMA: &str = "Chroma";
pub const OLLAMA_MODEL: &str = "OllamaModel";
pub const OLLAMA_EMBEDDINGS: &str = "OllamaEmbeddings";
pub const SPLIT_TEXT: &str = "SplitText";
pub const PROMPT: &str = "Prompt";

const NUMBER_OF_RESULTS: u64 = 10;
const CHUNK_SIZE: u64 = 1000;
const CHUNK_OVERLAP: u64 = 200;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Tweaks(BTreeMap<String, Map<String, Value>>);

fn options<const N: usize>(pairs: [(&str, Value); N]) -> Map<String, Value> {
    pairs
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

impl Tweaks {
    /// The mapping shared by both flows: vector store, models and splitter.
    pub fn base(config: &Config) -> Self {
        Tweaks::default()
            .with_component(
                CHROMA,
                options([
                    ("allow_duplicates", Value::Bool(false)),
                    ("collection_name", config.chroma_collection.clone().into()),
                    ("persist_directory", config.chroma_persist_dir.clone().into()),
                    ("number_of_results", NUMBER_OF_RESULTS.into()),
                    ("search_type", "Similarity".into()),
                ]),
            )
            .with_component(
                OLLAMA_MODEL,
                options([
                    ("base_url", config.ollama_base_url.clone().into()),
                    ("model_name", config.ollama_model.clone().into()),
                    ("temperature", 0.2_f64.into()),
                    ("stream", Value::Bool(false)),
                ]),
            )
            .with_component(
                OLLAMA_EMBEDDINGS,
                options([
                    ("base_url", config.ollama_base_url.clone().into()),
                    ("model", config.ollama_embedding_model.clone().into()),
                    ("temperature", 0.1_f64.into()),
                ]),
            )
            .with_component(
                SPLIT_TEXT,
                options([
                    ("chunk_overlap", CHUNK_OVERLAP.into()),
                    ("chunk_size", CHUNK_SIZE.into()),
                    ("separator", "\n".into()),
                ]),
            )
    }

    /// Replaces the whole entry for `component`; options are not merged.
    pub fn with_component(mut self, component: &str, options: Map<String, Value>) -> Self {
        self.0.insert(component.to_string(), options);
        self
    }

    /// Copy of `self` with the `Prompt` component set to `template`.
    pub fn with_prompt(&self, template: &str) -> Self {
        self.clone()
            .with_component(PROMPT, options([("template", template.into())]))
    }

    #[cfg(test)]
    pub fn component(&self, name: &str) -> Option<&Map<String, Value>> {
        self.0.get(name)
    }
}
