//! Reference vocabularies for skill and education matching

use crate::error::{MatcherError, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

const BUILTIN_VOCABULARY: &str = include_str!("../../data/vocabulary.toml");

/// Skill and degree keyword lists, in reference order.
///
/// Loaded once at startup and handed to the matchers; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub skills: Vec<String>,
    pub degrees: Vec<String>,
}

/// On-disk override; a missing list falls back to the built-in one.
#[derive(Debug, Deserialize)]
struct VocabularyFile {
    skills: Option<Vec<String>>,
    degrees: Option<Vec<String>>,
}

impl Vocabulary {
    pub fn new(skills: Vec<String>, degrees: Vec<String>) -> Result<Self> {
        let vocabulary = Self { skills, degrees };
        vocabulary.validate()?;
        Ok(vocabulary)
    }

    pub fn builtin() -> Result<Self> {
        let vocabulary: Vocabulary = toml::from_str(BUILTIN_VOCABULARY)
            .map_err(|e| MatcherError::Vocabulary(format!("Failed to parse built-in vocabulary: {}", e)))?;
        vocabulary.validate()?;
        Ok(vocabulary)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            MatcherError::Vocabulary(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let file: VocabularyFile = toml::from_str(&content).map_err(|e| {
            MatcherError::Vocabulary(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        let builtin = Self::builtin()?;
        let vocabulary = Self::new(
            file.skills.unwrap_or(builtin.skills),
            file.degrees.unwrap_or(builtin.degrees),
        )?;

        info!(
            "Loaded vocabulary from {} ({} skills, {} degree keywords)",
            path.display(),
            vocabulary.skills.len(),
            vocabulary.degrees.len()
        );
        Ok(vocabulary)
    }

    /// Blank entries would be contained in every text.
    fn validate(&self) -> Result<()> {
        for (kind, entries) in [("skill", &self.skills), ("degree", &self.degrees)] {
            if let Some(position) = entries.iter().position(|entry| entry.trim().is_empty()) {
                return Err(MatcherError::Vocabulary(format!(
                    "Blank {} entry at position {}",
                    kind, position
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_vocabulary_loads() {
        let vocabulary = Vocabulary::builtin().unwrap();
        assert_eq!(vocabulary.skills.first().map(String::as_str), Some("Python"));
        assert!(vocabulary.skills.iter().any(|s| s == "Machine Learning"));
        assert!(vocabulary.degrees.iter().any(|d| d == "b.sc"));
    }

    #[test]
    fn test_builtin_keeps_duplicates() {
        let vocabulary = Vocabulary::builtin().unwrap();
        let kubernetes = vocabulary.skills.iter().filter(|s| *s == "Kubernetes").count();
        assert!(kubernetes > 1);
    }

    #[test]
    fn test_blank_entry_rejected() {
        let result = Vocabulary::new(vec!["Rust".to_string(), " ".to_string()], Vec::new());
        assert!(matches!(result, Err(MatcherError::Vocabulary(_))));
    }

    #[test]
    fn test_file_override_falls_back_per_list() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "skills = [\"Rust\", \"Tokio\"]").unwrap();

        let vocabulary = Vocabulary::from_file(file.path()).unwrap();
        assert_eq!(vocabulary.skills, vec!["Rust", "Tokio"]);
        assert_eq!(vocabulary.degrees, Vocabulary::builtin().unwrap().degrees);
    }
}
