//! Configuration management for the resume matcher

use crate::error::{MatcherError, Result};
use crate::processing::matcher::DEFAULT_SUMMARY_LENGTH;
use crate::processing::vocabulary::Vocabulary;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub vocabulary: VocabularyConfig,
    #[serde(default)]
    pub processing: ProcessingConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VocabularyConfig {
    /// TOML file with `skills` and/or `degrees` lists replacing the built-in ones.
    pub vocabulary_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingConfig {
    pub summary_length: usize,
    pub enable_caching: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            summary_length: DEFAULT_SUMMARY_LENGTH,
            enable_caching: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl Config {
    /// Loads the user config, writing defaults on first use.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| MatcherError::Configuration(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| MatcherError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-matcher")
            .join("config.toml")
    }

    /// The configured vocabulary file, or the built-in lists.
    pub fn load_vocabulary(&self) -> Result<Vocabulary> {
        match &self.vocabulary.vocabulary_file {
            Some(path) => Vocabulary::from_file(path),
            None => Vocabulary::builtin(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.processing.summary_length, 300);
        assert!(config.processing.enable_caching);
        assert_eq!(config.output.format, OutputFormat::Console);
        assert!(config.vocabulary.vocabulary_file.is_none());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.processing.summary_length = 120;
        config.output.format = OutputFormat::Json;
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_section_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[processing]\nsummary_length = 50\nenable_caching = false\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.processing.summary_length, 50);
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_invalid_file_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "processing = 3").unwrap();
        assert!(matches!(Config::load_from(&path), Err(MatcherError::Configuration(_))));
    }
}
