//! Text normalization: lowercase, strip non-letters, tokenize, drop stop words, lemmatize

use crate::processing::lemmatizer::Lemmatizer;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use unicode_segmentation::UnicodeSegmentation;

/// Lemmatized, stop-word-free tokens joined by single spaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.split(' ').filter(|token| !token.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The first `max_chars` characters.
    pub fn summary(&self, max_chars: usize) -> String {
        self.0.chars().take(max_chars).collect()
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

pub struct Normalizer {
    stop_words: HashSet<String>,
    lemmatizer: Lemmatizer,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::english()
    }
}

impl Normalizer {
    pub fn english() -> Self {
        Self::new(Self::create_stop_words(), Lemmatizer::english())
    }

    pub fn new(stop_words: HashSet<String>, lemmatizer: Lemmatizer) -> Self {
        Self {
            stop_words,
            lemmatizer,
        }
    }

    pub fn normalize(&self, text: &str) -> NormalizedText {
        let letters_only: String = text
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_lowercase() || c.is_whitespace())
            .collect();

        let tokens: Vec<String> = letters_only
            .unicode_words()
            .filter(|word| !self.is_stop_word(word))
            .map(|word| self.lemmatizer.lemmatize(word))
            // a lemma can itself be a stop word; dropping it keeps normalization idempotent
            .filter(|lemma| !self.is_stop_word(lemma))
            .collect();

        NormalizedText(tokens.join(" "))
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// The standard English stop word list
    fn create_stop_words() -> HashSet<String> {
        let stop_words = [
            "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're",
            "you've", "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him",
            "his", "himself", "she", "she's", "her", "hers", "herself", "it", "it's", "its",
            "itself", "they", "them", "their", "theirs", "themselves", "what", "which", "who",
            "whom", "this", "that", "that'll", "these", "those", "am", "is", "are", "was", "were",
            "be", "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing",
            "a", "an", "the", "and", "but", "if", "or", "because", "as", "until", "while", "of",
            "at", "by", "for", "with", "about", "against", "between", "into", "through", "during",
            "before", "after", "above", "below", "to", "from", "up", "down", "in", "out", "on",
            "off", "over", "under", "again", "further", "then", "once", "here", "there", "when",
            "where", "why", "how", "all", "any", "both", "each", "few", "more", "most", "other",
            "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than", "too",
            "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
            "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't",
            "didn", "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven",
            "haven't", "isn", "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn",
            "needn't", "shan", "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren",
            "weren't", "won", "won't", "wouldn", "wouldn't",
        ];

        stop_words.iter().map(|&s| s.to_string()).collect()
    }
}
