//! Report envelopes handed to the formatters

use crate::processing::matcher::MatchReport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Minimum overall match considered a strong fit in human-readable output.
pub const STRONG_MATCH_THRESHOLD: f64 = 70.0;
/// Minimum overall match considered a partial fit.
pub const PARTIAL_MATCH_THRESHOLD: f64 = 40.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOutput {
    pub generated_at: DateTime<Utc>,
    pub resume_source: String,
    pub job_source: String,
    pub report: MatchReport,
}

impl AnalysisOutput {
    pub fn new(resume_source: impl Into<String>, job_source: impl Into<String>, report: MatchReport) -> Self {
        Self {
            generated_at: Utc::now(),
            resume_source: resume_source.into(),
            job_source: job_source.into(),
            report,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingEntry {
    pub rank: usize,
    pub resume_source: String,
    pub report: MatchReport,
}

/// Several resumes scored against one job description, best first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingOutput {
    pub generated_at: DateTime<Utc>,
    pub job_source: String,
    pub entries: Vec<RankingEntry>,
}

impl RankingOutput {
    /// Orders by overall match, then skills match, then source name.
    pub fn new(job_source: impl Into<String>, mut results: Vec<(String, MatchReport)>) -> Self {
        results.sort_by(|(a_source, a), (b_source, b)| {
            b.overall_match_percentage
                .total_cmp(&a.overall_match_percentage)
                .then(b.skills_match_percentage.total_cmp(&a.skills_match_percentage))
                .then_with(|| a_source.cmp(b_source))
        });

        let entries = results
            .into_iter()
            .enumerate()
            .map(|(index, (resume_source, report))| RankingEntry {
                rank: index + 1,
                resume_source,
                report,
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            job_source: job_source.into(),
            entries,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitLevel {
    Strong,
    Partial,
    Weak,
}

impl FitLevel {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= STRONG_MATCH_THRESHOLD {
            FitLevel::Strong
        } else if percentage >= PARTIAL_MATCH_THRESHOLD {
            FitLevel::Partial
        } else {
            FitLevel::Weak
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FitLevel::Strong => "Strong match",
            FitLevel::Partial => "Partial match",
            FitLevel::Weak => "Weak match",
        }
    }
}
