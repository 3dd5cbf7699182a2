//! File type detection

use crate::error::{MatcherError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// `doc` is routed to the DOCX reader; legacy binary files then fail extraction.
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" | "doc" => Ok(DocumentFormat::Docx),
            other => Err(MatcherError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Lowercased text after the last `.` of a file name, or the whole name when it has none.
pub fn extension_of(file_name: &str) -> String {
    file_name
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_lowercase()
}
