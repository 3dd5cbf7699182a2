//! Dictionary-based skill and education extraction

use crate::error::{MatcherError, Result};
use aho_corasick::AhoCorasick;
use std::collections::HashMap;

/// Finds which reference-list entries occur in a text.
///
/// An entry matches when its lowercase form is a substring of the lowercased
/// text. Multi-word entries match only as a contiguous phrase. Matching is not
/// word-boundary aware, so "Java" is found inside "javascript".
pub struct KeywordMatcher {
    entries: Vec<String>,
    /// Index into the automaton's patterns for each entry; duplicates share one pattern.
    pattern_of_entry: Vec<usize>,
    automaton: AhoCorasick,
}

impl KeywordMatcher {
    pub fn new(entries: &[String]) -> Result<Self> {
        let mut patterns: Vec<String> = Vec::new();
        let mut pattern_ids: HashMap<String, usize> = HashMap::new();
        let mut pattern_of_entry = Vec::with_capacity(entries.len());

        for entry in entries {
            let lowered = entry.to_lowercase();
            let id = *pattern_ids.entry(lowered.clone()).or_insert_with(|| {
                patterns.push(lowered);
                patterns.len() - 1
            });
            pattern_of_entry.push(id);
        }

        let automaton = AhoCorasick::new(&patterns)
            .map_err(|e| MatcherError::Vocabulary(format!("Failed to build keyword matcher: {}", e)))?;

        Ok(Self {
            entries: entries.to_vec(),
            pattern_of_entry,
            automaton,
        })
    }

    /// Entries found in `text`, in reference-list order, duplicates included.
    pub fn find(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let mut found = vec![false; self.automaton.patterns_len()];
        for mat in self.automaton.find_overlapping_iter(lowered.as_str()) {
            found[mat.pattern().as_usize()] = true;
        }

        self.entries
            .iter()
            .zip(&self.pattern_of_entry)
            .filter(|(_, id)| found[**id])
            .map(|(entry, _)| entry.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Matches skills against normalized text.
pub struct SkillMatcher(KeywordMatcher);

impl SkillMatcher {
    pub fn new(skills: &[String]) -> Result<Self> {
        Ok(Self(KeywordMatcher::new(skills)?))
    }

    pub fn match_skills(&self, normalized_text: &str) -> Vec<String> {
        self.0.find(normalized_text)
    }

    pub fn vocabulary_size(&self) -> usize {
        self.0.len()
    }
}

/// Matches degree and field keywords against raw text.
///
/// Runs before normalization so abbreviations like "b.sc" keep their periods.
pub struct EducationMatcher(KeywordMatcher);

impl EducationMatcher {
    pub fn new(degrees: &[String]) -> Result<Self> {
        Ok(Self(KeywordMatcher::new(degrees)?))
    }

    pub fn match_education(&self, raw_text: &str) -> Vec<String> {
        self.0.find(raw_text)
    }

    pub fn vocabulary_size(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_reference_order_and_case_insensitive() {
        let matcher = SkillMatcher::new(&list(&["Python", "Java", "Docker", "Rust"])).unwrap();
        let skills = matcher.match_skills("I know PYTHON and docker");
        assert_eq!(skills, vec!["Python", "Docker"]);

        let skills = matcher.match_skills("docker first, then python");
        assert_eq!(skills, vec!["Python", "Docker"]);
    }

    #[test]
    fn test_multi_word_entries_match_as_phrase() {
        let matcher = SkillMatcher::new(&list(&["Machine Learning", "Deep Learning"])).unwrap();
        assert_eq!(matcher.match_skills("applied machine learning"), vec!["Machine Learning"]);
        assert!(matcher.match_skills("machine vision and learning").is_empty());
    }

    #[test]
    fn test_substring_matches_inside_longer_words() {
        let matcher = SkillMatcher::new(&list(&["Java", "JavaScript"])).unwrap();
        assert_eq!(matcher.match_skills("javascript"), vec!["Java", "JavaScript"]);
    }

    #[test]
    fn test_overlapping_entries_all_reported() {
        let matcher = SkillMatcher::new(&list(&["Docker", "Docker Compose", "Compose"])).unwrap();
        assert_eq!(
            matcher.match_skills("docker compose"),
            vec!["Docker", "Docker Compose", "Compose"]
        );
    }

    #[test]
    fn test_duplicates_preserved() {
        let matcher = SkillMatcher::new(&list(&["Git", "SQL", "Git"])).unwrap();
        assert_eq!(matcher.match_skills("git"), vec!["Git", "Git"]);
    }

    #[test]
    fn test_education_keeps_abbreviation_periods() {
        let matcher = EducationMatcher::new(&list(&["bachelor", "b.sc", "master of"])).unwrap();
        assert_eq!(
            matcher.match_education("B.Sc. in Physics, Bachelor exchange program"),
            vec!["bachelor", "b.sc"]
        );
    }

    #[test]
    fn test_empty_vocabulary_matches_nothing() {
        let matcher = SkillMatcher::new(&[]).unwrap();
        assert!(matcher.match_skills("python docker").is_empty());
        assert_eq!(matcher.vocabulary_size(), 0);
    }
}
