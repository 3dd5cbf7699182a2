//! Input manager for handling different file types

use crate::error::{MatcherError, Result};
use crate::input::document::{Document, JobDescription};
use crate::input::file_detector::DocumentFormat;
use crate::input::text_extractor::{DocxExtractor, PdfExtractor, TextExtractor};
use log::info;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Reads a PDF or DOCX file and returns its raw text.
    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        let document = self.load_document(path).await?;
        let text = extract_document(&document)?;

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    /// Reads a file into a [`Document`] without extracting it.
    pub async fn load_document(&self, path: &Path) -> Result<Document> {
        if !path.exists() {
            return Err(MatcherError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| MatcherError::InvalidInput(format!("Invalid file name: {}", path.display())))?;

        let content = fs::read(path).await?;
        Ok(Document::from_file_name(content, file_name))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

/// Extracts raw text from an in-memory document.
///
/// Fails with `UnsupportedFormat` for unknown extensions and with `EmptyDocument`
/// when extraction succeeds but yields only whitespace.
pub fn extract_document(document: &Document) -> Result<String> {
    let text = match document.format()? {
        DocumentFormat::Pdf => {
            info!("Extracting text from PDF ({} bytes)", document.content.len());
            PdfExtractor.extract(&document.content)?
        }
        DocumentFormat::Docx => {
            info!("Extracting text from DOCX ({} bytes)", document.content.len());
            DocxExtractor.extract(&document.content)?
        }
    };

    if text.trim().is_empty() {
        return Err(MatcherError::EmptyDocument);
    }

    Ok(text)
}

/// Raw text of a job description, extracting it first when it is a document.
pub fn job_description_text(job_description: &JobDescription) -> Result<String> {
    match job_description {
        JobDescription::Document(document) => extract_document(document),
        JobDescription::Text(text) if text.trim().is_empty() => Err(MatcherError::EmptyDocument),
        JobDescription::Text(text) => Ok(text.clone()),
    }
}
