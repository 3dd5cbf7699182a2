//! Error handling for the resume matcher

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatcherError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File format not supported: {0}. Please provide a PDF or DOCX file")]
    UnsupportedFormat(String),

    #[error("No text extracted from the document. Please check the file")]
    EmptyDocument,

    #[error("Text extraction failed: {0}")]
    ExtractionFailure(String),

    #[error("Both documents normalize to zero tokens")]
    DegenerateInput,

    #[error("Missing input: {0}")]
    MissingInput(&'static str),

    #[error("Vocabulary error: {0}")]
    Vocabulary(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MatcherError {
    /// Errors caused by the caller's input rather than by the host.
    ///
    /// A service maps these to 400-class responses.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            MatcherError::UnsupportedFormat(_)
                | MatcherError::EmptyDocument
                | MatcherError::ExtractionFailure(_)
                | MatcherError::MissingInput(_)
                | MatcherError::InvalidInput(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, MatcherError>;

impl From<zip::result::ZipError> for MatcherError {
    fn from(err: zip::result::ZipError) -> Self {
        MatcherError::ExtractionFailure(format!("not a readable DOCX archive: {}", err))
    }
}

impl From<quick_xml::Error> for MatcherError {
    fn from(err: quick_xml::Error) -> Self {
        MatcherError::ExtractionFailure(format!("malformed DOCX body: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(MatcherError::UnsupportedFormat("txt".to_string()).is_client_error());
        assert!(MatcherError::EmptyDocument.is_client_error());
        assert!(MatcherError::ExtractionFailure("corrupt".to_string()).is_client_error());
        assert!(MatcherError::MissingInput("resume").is_client_error());
        assert!(!MatcherError::Vocabulary("empty entry".to_string()).is_client_error());
        assert!(!MatcherError::DegenerateInput.is_client_error());
    }

    #[test]
    fn test_unsupported_format_names_extension() {
        let err = MatcherError::UnsupportedFormat("txt".to_string());
        assert!(err.to_string().contains("txt"));
    }
}
