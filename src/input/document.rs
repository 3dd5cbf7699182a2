//! Uploaded documents and analysis requests

use crate::error::{MatcherError, Result};
use crate::input::file_detector::{extension_of, DocumentFormat};

/// Raw bytes of an uploaded file plus its declared extension.
#[derive(Debug, Clone)]
pub struct Document {
    pub content: Vec<u8>,
    pub extension: String,
}

impl Document {
    pub fn new(content: Vec<u8>, extension: impl Into<String>) -> Self {
        Self {
            content,
            extension: extension.into(),
        }
    }

    /// Infers the extension from an upload's file name.
    pub fn from_file_name(content: Vec<u8>, file_name: &str) -> Self {
        Self::new(content, extension_of(file_name))
    }

    pub fn format(&self) -> Result<DocumentFormat> {
        DocumentFormat::from_extension(&self.extension)
    }
}

/// A job description arrives either as a file or as pasted text.
#[derive(Debug, Clone)]
pub enum JobDescription {
    Document(Document),
    Text(String),
}

#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub resume: Document,
    pub job_description: JobDescription,
}

impl AnalysisRequest {
    /// Validates the request inputs.
    ///
    /// A resume is required, plus a job description document or non-empty text.
    /// When both are supplied the document is used.
    pub fn new(
        resume: Option<Document>,
        job_document: Option<Document>,
        job_text: Option<String>,
    ) -> Result<Self> {
        let resume = resume.ok_or(MatcherError::MissingInput("a resume document is required"))?;

        let job_description = match (job_document, job_text) {
            (Some(document), _) => JobDescription::Document(document),
            (None, Some(text)) if !text.is_empty() => JobDescription::Text(text),
            _ => {
                return Err(MatcherError::MissingInput(
                    "a job description document or text is required",
                ))
            }
        };

        Ok(Self {
            resume,
            job_description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf() -> Document {
        Document::from_file_name(b"%PDF-".to_vec(), "resume.pdf")
    }

    #[test]
    fn test_extension_inferred_from_name() {
        let doc = Document::from_file_name(Vec::new(), "Resume.DOCX");
        assert_eq!(doc.extension, "docx");
        assert_eq!(doc.format().unwrap(), DocumentFormat::Docx);
    }

    #[test]
    fn test_request_requires_resume() {
        let result = AnalysisRequest::new(None, None, Some("Python developer".to_string()));
        assert!(matches!(result, Err(MatcherError::MissingInput(_))));
    }

    #[test]
    fn test_request_requires_job_description() {
        assert!(matches!(
            AnalysisRequest::new(Some(pdf()), None, None),
            Err(MatcherError::MissingInput(_))
        ));
        assert!(matches!(
            AnalysisRequest::new(Some(pdf()), None, Some(String::new())),
            Err(MatcherError::MissingInput(_))
        ));
    }

    #[test]
    fn test_document_preferred_over_text() {
        let request = AnalysisRequest::new(Some(pdf()), Some(pdf()), Some("text".to_string())).unwrap();
        assert!(matches!(request.job_description, JobDescription::Document(_)));

        let request = AnalysisRequest::new(Some(pdf()), None, Some("text".to_string())).unwrap();
        assert!(matches!(request.job_description, JobDescription::Text(ref t) if t == "text"));
    }
}
