//! Rule-based English noun lemmatizer

use std::collections::{HashMap, HashSet};

/// Irregular plurals and their base forms.
const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("people", "person"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("geese", "goose"),
    ("mice", "mouse"),
    ("analyses", "analysis"),
    ("crises", "crisis"),
    ("theses", "thesis"),
    ("hypotheses", "hypothesis"),
    ("diagnoses", "diagnosis"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("indices", "index"),
    ("matrices", "matrix"),
    ("vertices", "vertex"),
    ("appendices", "appendix"),
    ("curricula", "curriculum"),
    ("syllabi", "syllabus"),
    ("alumni", "alumnus"),
    ("wolves", "wolf"),
    ("knives", "knife"),
    ("lives", "life"),
    ("wives", "wife"),
    ("halves", "half"),
    ("leaves", "leaf"),
    ("shelves", "shelf"),
    ("thieves", "thief"),
    ("selves", "self"),
    ("heroes", "hero"),
    ("potatoes", "potato"),
    ("tomatoes", "tomato"),
    ("echoes", "echo"),
    ("vetoes", "veto"),
    ("buses", "bus"),
    ("gases", "gas"),
    ("statuses", "status"),
    ("viruses", "virus"),
    ("campuses", "campus"),
    ("bonuses", "bonus"),
    ("oases", "oasis"),
    ("aliases", "alias"),
    ("biases", "bias"),
    ("atlases", "atlas"),
    ("canvases", "canvas"),
    ("quizzes", "quiz"),
];

/// Words that end in `s` without being plurals.
const INVARIANT_WORDS: &[&str] = &[
    "series", "species", "news", "means", "headquarters", "kubernetes", "jenkins", "pandas",
    "aws", "ios", "windows", "sass", "less", "rails", "express", "postgres", "atlas", "canvas",
    "bias", "alias", "gas", "has", "was", "does", "this", "thus", "yes", "always", "perhaps",
    "whereas", "sometimes", "towards", "afterwards", "nowadays",
];

/// Suffixes that mark a singular word ending in `s`.
///
/// `js` covers framework names such as "nodejs" and "reactjs".
const SINGULAR_SUFFIXES: &[&str] = &["ss", "us", "is", "ics", "js"];

/// Minimum length for suffix rules to apply.
const MIN_RULE_LENGTH: usize = 4;

/// Reduces nouns to their dictionary base form ("skills" -> "skill", "companies" -> "company").
///
/// With the built-in tables every output is a fixed point, so lemmatizing twice is a no-op.
#[derive(Debug, Clone)]
pub struct Lemmatizer {
    exceptions: HashMap<String, String>,
    invariant: HashSet<String>,
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self::english()
    }
}

impl Lemmatizer {
    pub fn english() -> Self {
        Self::new(
            IRREGULAR_NOUNS
                .iter()
                .map(|(word, lemma)| (word.to_string(), lemma.to_string())),
            INVARIANT_WORDS.iter().map(|word| word.to_string()),
        )
    }

    pub fn new(
        exceptions: impl IntoIterator<Item = (String, String)>,
        invariant: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            exceptions: exceptions.into_iter().collect(),
            invariant: invariant.into_iter().collect(),
        }
    }

    pub fn lemmatize(&self, word: &str) -> String {
        if let Some(lemma) = self.exceptions.get(word) {
            return lemma.clone();
        }
        if self.invariant.contains(word)
            || word.len() < MIN_RULE_LENGTH
            || !word.ends_with('s')
            || SINGULAR_SUFFIXES.iter().any(|suffix| word.ends_with(suffix))
        {
            return word.to_string();
        }

        let stripped = self.strip_plural(word);
        // "mens" -> "men" must continue to "man"
        match self.exceptions.get(&stripped) {
            Some(lemma) => lemma.clone(),
            None => stripped,
        }
    }

    fn strip_plural(&self, word: &str) -> String {
        if let Some(stem) = word.strip_suffix("ies") {
            if word.len() > MIN_RULE_LENGTH {
                return format!("{}y", stem);
            }
        }
        for suffix in ["sses", "ches", "shes", "xes", "zzes"] {
            if word.ends_with(suffix) {
                return word[..word.len() - 2].to_string();
            }
        }
        word[..word.len() - 1].to_string()
    }
}
