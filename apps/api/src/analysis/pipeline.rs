//! Ranking pipeline. Runs every uploaded resume through
//! extract → prompt → score → parse, then ranks the results.
//!
//! Resumes are processed one at a time. The first failure aborts the run;
//! no partial result set is returned.

use tracing::info;

use crate::analysis::extractor::{ResumeDocument, TextExtractor};
use crate::analysis::parser::parse_evaluation;
use crate::analysis::prompts::build_ats_prompt;
use crate::analysis::ranking::{AnalysisResult, RankedResultSet};
use crate::analysis::AnalysisError;
use crate::llm_client::ScoringBackend;

/// Analyzes a single resume against the job description.
pub async fn analyze_resume(
    document: &ResumeDocument,
    upload_index: usize,
    jd_text: &str,
    extractor: &dyn TextExtractor,
    scorer: &dyn ScoringBackend,
) -> Result<AnalysisResult, AnalysisError> {
    let resume_text = extractor.extract(document)?;
    info!(
        "Extracted {} chars from '{}'",
        resume_text.len(),
        document.file_name
    );

    let prompt = build_ats_prompt(&resume_text, jd_text);

    let raw = scorer
        .score(&prompt)
        .await
        .map_err(|source| AnalysisError::Scoring {
            document: document.file_name.clone(),
            source,
        })?;

    let evaluation = parse_evaluation(&raw).map_err(|source| AnalysisError::Parse {
        document: document.file_name.clone(),
        source,
    })?;

    Ok(AnalysisResult::from_evaluation(
        document.file_name.clone(),
        upload_index,
        evaluation,
    ))
}

/// Runs the full batch sequentially and returns the ranked set.
pub async fn run_analysis(
    documents: &[ResumeDocument],
    jd_text: &str,
    extractor: &dyn TextExtractor,
    scorer: &dyn ScoringBackend,
) -> Result<RankedResultSet, AnalysisError> {
    let mut results = Vec::with_capacity(documents.len());

    for (index, document) in documents.iter().enumerate() {
        let result = analyze_resume(document, index, jd_text, extractor, scorer).await?;
        info!(
            "Scored '{}' ({}/{}): {}",
            document.file_name,
            index + 1,
            documents.len(),
            result.match_score
        );
        results.push(result);
    }

    Ok(RankedResultSet::rank(results))
}
