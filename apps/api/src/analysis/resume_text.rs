//! Turns an uploaded résumé into the text handed to a flow.

use bytes::Bytes;
use thiserror::Error;

use crate::config::ResumeTextMode;

#[derive(Debug, Error)]
pub enum ResumeTextError {
    #[error("cannot extract PDF text: {0}")]
    Extract(String),

    #[error("text extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Decodes `bytes` as UTF-8, silently dropping every invalid sequence.
pub fn decode_lossy(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}

/// Produces the flow input for a résumé according to `mode`.
pub async fn resume_text(mode: ResumeTextMode, bytes: Bytes) -> Result<String, ResumeTextError> {
    match mode {
        ResumeTextMode::Raw => Ok(decode_lossy(&bytes)),
        ResumeTextMode::Extract => tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes)
                .map_err(|e| ResumeTextError::Extract(format!("{e:?}")))
        })
        .await?,
    }
}
