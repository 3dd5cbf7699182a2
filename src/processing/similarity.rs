//! TF-IDF vectorization and cosine similarity over a request-scoped corpus

use crate::error::{MatcherError, Result};
use crate::processing::normalizer::NormalizedText;
use log::{debug, warn};
use std::collections::{BTreeMap, HashMap};

/// Tokens shorter than this are not indexed.
const MIN_TOKEN_CHARS: usize = 2;

/// Term weights fitted on a small corpus.
///
/// Vocabulary and IDF come only from the documents passed to [`TfIdfModel::fit`].
/// IDF is smoothed, `ln((1 + n) / (1 + df)) + 1`, and document vectors are raw
/// term counts times IDF, scaled to unit length.
#[derive(Debug, Clone)]
pub struct TfIdfModel {
    idf: BTreeMap<String, f64>,
    vectors: Vec<HashMap<String, f64>>,
}

impl TfIdfModel {
    /// Fails with `DegenerateInput` when the corpus has no indexable token.
    pub fn fit(documents: &[&NormalizedText]) -> Result<Self> {
        let counts: Vec<HashMap<&str, usize>> = documents.iter().map(|doc| term_counts(doc)).collect();

        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for doc_counts in &counts {
            for term in doc_counts.keys() {
                *document_frequency.entry(*term).or_insert(0) += 1;
            }
        }

        if document_frequency.is_empty() {
            return Err(MatcherError::DegenerateInput);
        }

        let n = documents.len() as f64;
        let idf: BTreeMap<String, f64> = document_frequency
            .iter()
            .map(|(term, df)| (term.to_string(), ((1.0 + n) / (1.0 + *df as f64)).ln() + 1.0))
            .collect();

        let vectors = counts
            .iter()
            .map(|doc_counts| {
                let mut vector: HashMap<String, f64> = doc_counts
                    .iter()
                    .map(|(term, count)| (term.to_string(), *count as f64 * idf[*term]))
                    .collect();
                let norm = vector.values().map(|w| w * w).sum::<f64>().sqrt();
                if norm > 0.0 {
                    vector.values_mut().for_each(|w| *w /= norm);
                }
                vector
            })
            .collect();

        debug!("Fitted TF-IDF over {} documents, {} terms", documents.len(), idf.len());
        Ok(Self { idf, vectors })
    }

    pub fn vocabulary_size(&self) -> usize {
        self.idf.len()
    }

    /// Cosine similarity between two fitted documents; 0 when either vector is empty.
    pub fn cosine_similarity(&self, a: usize, b: usize) -> f64 {
        let (Some(left), Some(right)) = (self.vectors.get(a), self.vectors.get(b)) else {
            return 0.0;
        };
        let (small, large) = if left.len() <= right.len() {
            (left, right)
        } else {
            (right, left)
        };
        small
            .iter()
            .filter_map(|(term, weight)| large.get(term).map(|other| weight * other))
            .sum::<f64>()
            .clamp(0.0, 1.0)
    }
}

fn term_counts(text: &NormalizedText) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for token in text.tokens() {
        if token.chars().count() >= MIN_TOKEN_CHARS {
            *counts.entry(token).or_insert(0) += 1;
        }
    }
    counts
}

/// Overall resume/job-description similarity as a percentage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityScore {
    pub percentage: f64,
    /// Neither document had an indexable token; `percentage` is 0.
    pub degenerate: bool,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SimilarityScorer;

impl SimilarityScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, resume: &NormalizedText, job_description: &NormalizedText) -> SimilarityScore {
        match TfIdfModel::fit(&[resume, job_description]) {
            Ok(model) => SimilarityScore {
                percentage: model.cosine_similarity(0, 1) * 100.0,
                degenerate: false,
            },
            Err(e) => {
                warn!("Similarity scoring skipped: {}", e);
                SimilarityScore {
                    percentage: 0.0,
                    degenerate: true,
                }
            }
        }
    }
}
