//! Match aggregation: similarity plus skill, education and experience coverage

use crate::error::{MatcherError, Result};
use crate::input::document::{AnalysisRequest, Document};
use crate::input::manager::{extract_document, job_description_text};
use crate::processing::entity_extractor::{EducationMatcher, SkillMatcher};
use crate::processing::experience::ExperienceExtractor;
use crate::processing::normalizer::{NormalizedText, Normalizer};
use crate::processing::similarity::{SimilarityScore, SimilarityScorer};
use crate::processing::vocabulary::Vocabulary;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

/// Characters of normalized text kept as a document summary.
pub const DEFAULT_SUMMARY_LENGTH: usize = 300;

/// Entities found in one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityProfile {
    /// Matched skills in reference-list order, without repeats.
    pub skills: Vec<String>,
    /// Matched degree and field keywords in reference-list order, without repeats.
    pub education: Vec<String>,
    pub experience_years: u32,
}

/// One document after normalization and entity extraction.
#[derive(Debug, Clone)]
pub struct AnalyzedDocument {
    pub normalized: NormalizedText,
    pub profile: EntityProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    /// Cosine similarity of the TF-IDF vectors, 0-100.
    pub overall_match_percentage: f64,
    pub skills_match_percentage: f64,
    pub education_match_percentage: f64,
    pub experience_match_percentage: f64,
    pub matching_skills: BTreeSet<String>,
    pub missing_skills: BTreeSet<String>,
    pub extra_skills: BTreeSet<String>,
    pub resume_summary: String,
    pub job_description_summary: String,
    pub analysis_details: String,
    pub resume_profile: EntityProfile,
    pub job_profile: EntityProfile,
}

/// `part / whole * 100`, or 0 when `whole` is 0.
pub fn overlap_percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Experience coverage capped at 100; 0 when the job states no requirement.
pub fn experience_percentage(resume_years: u32, required_years: u32) -> f64 {
    if required_years == 0 {
        0.0
    } else {
        (resume_years as f64 / required_years as f64).min(1.0) * 100.0
    }
}

/// Scores resumes against job descriptions.
///
/// Immutable after construction; one engine can serve concurrent requests.
pub struct MatchEngine {
    normalizer: Normalizer,
    skill_matcher: SkillMatcher,
    education_matcher: EducationMatcher,
    experience_extractor: ExperienceExtractor,
    scorer: SimilarityScorer,
    summary_length: usize,
}

impl MatchEngine {
    pub fn new(vocabulary: &Vocabulary) -> Result<Self> {
        Ok(Self {
            normalizer: Normalizer::english(),
            skill_matcher: SkillMatcher::new(&vocabulary.skills)?,
            education_matcher: EducationMatcher::new(&vocabulary.degrees)?,
            experience_extractor: ExperienceExtractor::new(),
            scorer: SimilarityScorer::new(),
            summary_length: DEFAULT_SUMMARY_LENGTH,
        })
    }

    pub fn with_summary_length(mut self, summary_length: usize) -> Self {
        self.summary_length = summary_length;
        self
    }

    pub fn skill_vocabulary_size(&self) -> usize {
        self.skill_matcher.vocabulary_size()
    }

    pub fn degree_vocabulary_size(&self) -> usize {
        self.education_matcher.vocabulary_size()
    }

    /// Normalizes raw text and extracts its entities.
    ///
    /// Experience and education read the raw text; skills read the normalized text.
    pub fn analyze_document(&self, raw_text: &str) -> AnalyzedDocument {
        let normalized = self.normalizer.normalize(raw_text);
        let profile = EntityProfile {
            skills: dedup_in_order(self.skill_matcher.match_skills(normalized.as_str())),
            education: dedup_in_order(self.education_matcher.match_education(raw_text)),
            experience_years: self.experience_extractor.extract_years(raw_text),
        };
        debug!(
            "Document profile: {} tokens, {} skills, {} education keywords, {} years",
            normalized.tokens().count(),
            profile.skills.len(),
            profile.education.len(),
            profile.experience_years
        );
        AnalyzedDocument { normalized, profile }
    }

    /// Builds the report for two raw texts.
    pub fn analyze(&self, resume_text: &str, job_text: &str) -> MatchReport {
        info!(
            "Analyzing resume ({} chars) against job description ({} chars)",
            resume_text.chars().count(),
            job_text.chars().count()
        );
        let resume = self.analyze_document(resume_text);
        let job = self.analyze_document(job_text);
        self.compare(&resume, &job)
    }

    /// Extracts both documents of a request and builds the report.
    pub fn analyze_request(&self, request: &AnalysisRequest) -> Result<MatchReport> {
        let resume_text = extract_document(&request.resume)?;
        let job_text = job_description_text(&request.job_description)?;
        Ok(self.analyze(&resume_text, &job_text))
    }

    /// Extracts and scores each resume on the blocking pool, one task per resume.
    ///
    /// Results keep the input order; a resume that fails extraction carries its error.
    pub async fn analyze_resumes(
        self: &Arc<Self>,
        resumes: Vec<(String, Document)>,
        job_text: Arc<String>,
    ) -> Vec<(String, Result<MatchReport>)> {
        let tasks: Vec<_> = resumes
            .into_iter()
            .map(|(source, document)| {
                let engine = Arc::clone(self);
                let job_text = Arc::clone(&job_text);
                let task = tokio::task::spawn_blocking(move || {
                    extract_document(&document).map(|resume_text| engine.analyze(&resume_text, &job_text))
                });
                (source, task)
            })
            .collect();

        let mut results = Vec::with_capacity(tasks.len());
        for (source, task) in tasks {
            let report = task.await.unwrap_or_else(|e| {
                Err(MatcherError::ExtractionFailure(format!("analysis task failed: {}", e)))
            });
            results.push((source, report));
        }
        debug!("Analyzed {} resumes concurrently", results.len());
        results
    }

    /// Combines two analyzed documents into a report.
    pub fn compare(&self, resume: &AnalyzedDocument, job: &AnalyzedDocument) -> MatchReport {
        let similarity = self.scorer.score(&resume.normalized, &job.normalized);

        let resume_skills: BTreeSet<String> = resume.profile.skills.iter().cloned().collect();
        let job_skills: BTreeSet<String> = job.profile.skills.iter().cloned().collect();
        let matching_skills: BTreeSet<String> = resume_skills.intersection(&job_skills).cloned().collect();
        let missing_skills: BTreeSet<String> = job_skills.difference(&resume_skills).cloned().collect();
        let extra_skills: BTreeSet<String> = resume_skills.difference(&job_skills).cloned().collect();

        let resume_education: HashSet<&String> = resume.profile.education.iter().collect();
        let job_education: HashSet<&String> = job.profile.education.iter().collect();
        let matching_education = resume_education.intersection(&job_education).count();

        let report = MatchReport {
            overall_match_percentage: similarity.percentage,
            skills_match_percentage: overlap_percentage(matching_skills.len(), job_skills.len()),
            education_match_percentage: overlap_percentage(matching_education, job_education.len()),
            experience_match_percentage: experience_percentage(
                resume.profile.experience_years,
                job.profile.experience_years,
            ),
            analysis_details: describe(
                &similarity,
                matching_skills.len(),
                job_skills.len(),
                matching_education,
                job_education.len(),
                resume.profile.experience_years,
                job.profile.experience_years,
            ),
            matching_skills,
            missing_skills,
            extra_skills,
            resume_summary: resume.normalized.summary(self.summary_length),
            job_description_summary: job.normalized.summary(self.summary_length),
            resume_profile: resume.profile.clone(),
            job_profile: job.profile.clone(),
        };

        info!(
            "Overall match {:.1}% (skills {:.1}%, education {:.1}%, experience {:.1}%)",
            report.overall_match_percentage,
            report.skills_match_percentage,
            report.education_match_percentage,
            report.experience_match_percentage
        );
        report
    }
}

fn dedup_in_order(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(item.clone())).collect()
}

fn describe(
    similarity: &SimilarityScore,
    matching_skills: usize,
    required_skills: usize,
    matching_education: usize,
    required_education: usize,
    resume_years: u32,
    required_years: u32,
) -> String {
    let mut sentences = Vec::new();

    if similarity.degenerate {
        sentences.push("Neither document contains comparable text, so overall similarity is 0.".to_string());
    }

    sentences.push(if required_skills == 0 {
        "The job description names no recognised skills.".to_string()
    } else {
        format!(
            "The resume covers {} of {} skills named in the job description.",
            matching_skills, required_skills
        )
    });

    sentences.push(if required_education == 0 {
        "No education requirement was recognised.".to_string()
    } else {
        format!(
            "{} of {} education keywords match.",
            matching_education, required_education
        )
    });

    sentences.push(if required_years == 0 {
        "No years-of-experience requirement was recognised.".to_string()
    } else {
        format!(
            "The resume claims {} years of experience against {} required.",
            resume_years, required_years
        )
    });

    sentences.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn small_engine() -> MatchEngine {
        let vocabulary = Vocabulary::new(
            list(&["Python", "Docker", "Kubernetes", "Machine Learning"]),
            list(&["bachelor", "master", "computer science"]),
        )
        .unwrap();
        MatchEngine::new(&vocabulary).unwrap()
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_zero_division_guards() {
        assert_eq!(overlap_percentage(0, 0), 0.0);
        assert_eq!(overlap_percentage(3, 4), 75.0);
        assert_eq!(experience_percentage(5, 0), 0.0);
    }

    #[test]
    fn test_experience_capped() {
        assert_eq!(experience_percentage(10, 2), 100.0);
        assert_eq!(experience_percentage(1, 4), 25.0);
        assert_eq!(experience_percentage(0, 3), 0.0);
    }

    #[test]
    fn test_skill_set_partition() {
        let engine = small_engine();
        let report = engine.analyze(
            "Python and Docker engineer",
            "We need Python and Kubernetes",
        );
        assert_eq!(report.matching_skills, set(&["Python"]));
        assert_eq!(report.missing_skills, set(&["Kubernetes"]));
        assert_eq!(report.extra_skills, set(&["Docker"]));
        assert_eq!(report.skills_match_percentage, 50.0);
    }

    #[test]
    fn test_job_without_skills_scores_zero_skills() {
        let engine = small_engine();
        let report = engine.analyze("Python developer", "Friendly receptionist wanted");
        assert_eq!(report.skills_match_percentage, 0.0);
        assert!(report.matching_skills.is_empty());
        assert_eq!(report.extra_skills, set(&["Python"]));
    }

    #[test]
    fn test_experience_comes_from_raw_text() {
        let engine = small_engine();
        let report = engine.analyze(
            "10 years experience with Python",
            "Python, 2 yrs of experience",
        );
        assert_eq!(report.resume_profile.experience_years, 10);
        assert_eq!(report.job_profile.experience_years, 2);
        assert_eq!(report.experience_match_percentage, 100.0);
    }

    #[test]
    fn test_education_overlap() {
        let engine = small_engine();
        let report = engine.analyze(
            "Bachelor of Computer Science",
            "Master or Bachelor in Computer Science",
        );
        assert_eq!(report.job_profile.education, vec!["bachelor", "master", "computer science"]);
        assert!((report.education_match_percentage - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_profile_deduplicates_in_reference_order() {
        let vocabulary = Vocabulary::new(list(&["Git", "SQL", "Git"]), Vec::new()).unwrap();
        let engine = MatchEngine::new(&vocabulary).unwrap();
        let document = engine.analyze_document("sql and git");
        assert_eq!(document.profile.skills, vec!["Git", "SQL"]);
    }

    #[test]
    fn test_summaries_truncated() {
        let engine = small_engine().with_summary_length(6);
        let report = engine.analyze("Python developer", "Docker engineer");
        assert_eq!(report.resume_summary, "python");
        assert_eq!(report.job_description_summary, "docker");
    }

    #[test]
    fn test_degenerate_input_reported_not_raised() {
        let engine = small_engine();
        let report = engine.analyze("2024 !!!", "the and of");
        assert_eq!(report.overall_match_percentage, 0.0);
        assert!(report.analysis_details.contains("comparable text"));
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let engine = small_engine();
        let first = engine.analyze("Python, Docker, 4 years experience", "Python 3 years experience");
        let second = engine.analyze("Python, Docker, 4 years experience", "Python 3 years experience");
        assert_eq!(first, second);
    }

    #[test]
    fn test_engine_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MatchEngine>();
    }
}
