use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// How résumé bytes are turned into flow input text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResumeTextMode {
    /// Decode the uploaded bytes directly, dropping anything that is not UTF-8.
    #[default]
    Raw,
    /// Pull the PDF text layer with `pdf-extract`.
    Extract,
}

impl FromStr for ResumeTextMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" => Ok(ResumeTextMode::Raw),
            "extract" => Ok(ResumeTextMode::Extract),
            other => bail!("RESUME_TEXT_MODE must be 'raw' or 'extract', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub langflow_url: String,
    pub langflow_api_key: Option<String>,
    pub flows_dir: PathBuf,
    pub flow_timeout_secs: u64,
    pub ollama_base_url: String,
    pub ollama_model: String,
    pub ollama_embedding_model: String,
    pub chroma_collection: String,
    pub chroma_persist_dir: String,
    pub pdfium_lib_path: Option<String>,
    pub pdf_render_scale: f32,
    pub max_upload_bytes: usize,
    pub resume_text_mode: ResumeTextMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            langflow_url: "http://localhost:7860".to_string(),
            langflow_api_key: None,
            flows_dir: PathBuf::from("flows"),
            flow_timeout_secs: 300,
            ollama_base_url: "http://localhost:11434".to_string(),
            ollama_model: "llama3:latest".to_string(),
            ollama_embedding_model: "nomic-embed-text:latest".to_string(),
            chroma_collection: "resume1".to_string(),
            chroma_persist_dir: "chroma".to_string(),
            pdfium_lib_path: None,
            pdf_render_scale: 1.0,
            max_upload_bytes: 20 * 1024 * 1024,
            resume_text_mode: ResumeTextMode::Raw,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. `from_env` passes the
    /// process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let string_or = |key: &str, default: String| lookup(key).unwrap_or(default);

        let pdf_render_scale = parse_or(&lookup, "PDF_RENDER_SCALE", defaults.pdf_render_scale)?;
        if !(pdf_render_scale > 0.0 && pdf_render_scale.is_finite()) {
            bail!("PDF_RENDER_SCALE must be a positive number, got {pdf_render_scale}");
        }

        Ok(Config {
            port: parse_or(&lookup, "PORT", defaults.port)?,
            rust_log: string_or("RUST_LOG", defaults.rust_log),
            langflow_url: string_or("LANGFLOW_URL", defaults.langflow_url)
                .trim_end_matches('/')
                .to_string(),
            langflow_api_key: lookup("LANGFLOW_API_KEY").filter(|k| !k.trim().is_empty()),
            flows_dir: lookup("FLOWS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.flows_dir),
            flow_timeout_secs: parse_or(&lookup, "FLOW_TIMEOUT_SECS", defaults.flow_timeout_secs)?,
            ollama_base_url: string_or("OLLAMA_BASE_URL", defaults.ollama_base_url),
            ollama_model: string_or("OLLAMA_MODEL", defaults.ollama_model),
            ollama_embedding_model: string_or(
                "OLLAMA_EMBEDDING_MODEL",
                defaults.ollama_embedding_model,
            ),
            chroma_collection: string_or("CHROMA_COLLECTION", defaults.chroma_collection),
            chroma_persist_dir: string_or("CHROMA_PERSIST_DIR", defaults.chroma_persist_dir),
            pdfium_lib_path: lookup("PDFIUM_LIB_PATH").filter(|p| !p.trim().is_empty()),
            pdf_render_scale,
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            resume_text_mode: parse_or(&lookup, "RESUME_TEXT_MODE", defaults.resume_text_mode)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
