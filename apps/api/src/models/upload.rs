use axum::extract::Multipart;
use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;

pub const RESUME_FIELD: &str = "resume";
pub const JOB_DESCRIPTION_FIELD: &str = "job_description";
pub const ZOOM_FIELD: &str = "zoom";

/// Rejection shown when a non-PDF file is uploaded.
pub const PDF_ONLY_MESSAGE: &str = "Only PDF files are accepted.";

/// A file received in one request. Never stored.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    /// Accepts a `.pdf` name or an `application/pdf` content type.
    pub fn is_pdf(&self) -> bool {
        let pdf_name = self.file_name.to_ascii_lowercase().ends_with(".pdf");
        let pdf_type = self
            .content_type
            .as_deref()
            .is_some_and(|ct| ct.eq_ignore_ascii_case("application/pdf"));
        pdf_name || pdf_type
    }
}

/// Everything the form can submit. Each endpoint reads what it needs.
#[derive(Debug, Default)]
pub struct ResumeForm {
    /// `None` when no file was chosen. A chosen zero-byte file is kept.
    pub resume: Option<UploadedFile>,
    pub job_description: String,
    pub zoom: Option<String>,
}

impl ResumeForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = ResumeForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                RESUME_FIELD => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field.bytes().await?;
                    if file_name.is_empty() && bytes.is_empty() {
                        debug!("Resume part carries no file");
                        continue;
                    }
                    let file = UploadedFile {
                        file_name,
                        content_type,
                        bytes,
                    };
                    if !file.is_pdf() {
                        return Err(AppError::Validation(PDF_ONLY_MESSAGE.to_string()));
                    }
                    form.resume = Some(file);
                }
                JOB_DESCRIPTION_FIELD => form.job_description = field.text().await?,
                ZOOM_FIELD => form.zoom = Some(field.text().await?),
                other => debug!("Skipping unknown form field '{other}'"),
            }
        }

        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, content_type: Option<&str>) -> UploadedFile {
        UploadedFile {
            file_name: name.to_string(),
            content_type: content_type.map(str::to_string),
            bytes: Bytes::from_static(b"%PDF-1.7"),
        }
    }

    #[test]
    fn test_pdf_detection_by_name_or_type() {
        assert!(file("cv.PDF", None).is_pdf());
        assert!(file("blob", Some("application/pdf")).is_pdf());
        assert!(!file("cv.docx", Some("application/octet-stream")).is_pdf());
    }
}
