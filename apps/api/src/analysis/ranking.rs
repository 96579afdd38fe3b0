//! Ranking: orders analysis results by match score and picks the top N.

use serde::Serialize;

use crate::analysis::parser::Evaluation;

/// How many results are shown when the caller does not ask for a count.
pub const DEFAULT_DISPLAY_COUNT: usize = 3;

/// Outcome of analyzing one resume. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// Upload file name of the resume this result belongs to.
    pub source_document: String,
    /// Position of the resume in the upload, zero-based.
    pub upload_index: usize,
    pub match_score: f64,
    pub profile_summary: String,
    pub missing_keywords: Vec<String>,
    /// Trimmed and lower-cased.
    pub extracted_skills: Vec<String>,
}

impl AnalysisResult {
    pub fn from_evaluation(source_document: String, upload_index: usize, eval: Evaluation) -> Self {
        Self {
            source_document,
            upload_index,
            match_score: eval.match_score,
            profile_summary: eval.profile_summary,
            missing_keywords: eval.missing_keywords,
            extracted_skills: eval
                .extracted_skills
                .iter()
                .map(|s| s.trim().to_lowercase())
                .collect(),
        }
    }
}

/// Results sorted by match score, highest first. Ties keep upload order.
#[derive(Debug, Clone)]
pub struct RankedResultSet {
    results: Vec<AnalysisResult>,
}

impl RankedResultSet {
    pub fn rank(mut results: Vec<AnalysisResult>) -> Self {
        // sort_by is stable
        results.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
        Self { results }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn as_slice(&self) -> &[AnalysisResult] {
        &self.results
    }

    /// The first `n` results; `n` larger than the set returns everything.
    pub fn top(&self, n: usize) -> &[AnalysisResult] {
        &self.results[..n.min(self.results.len())]
    }
}

/// Resolves the requested display count against the number of analyzed resumes.
///
/// Clamped to `[1, total]`; defaults to `min(3, total)`. Zero when nothing was analyzed.
pub fn resolve_display_count(requested: Option<usize>, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    requested
        .unwrap_or(DEFAULT_DISPLAY_COUNT)
        .clamp(1, total)
}
