use std::sync::Arc;

use crate::analysis::extractor::TextExtractor;
use crate::analysis::gate::AnalysisGate;
use crate::analysis::skills::SkillCompanyMap;
use crate::llm_client::ScoringBackend;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Gemini client in production; swapped for a stub in tests.
    pub scorer: Arc<dyn ScoringBackend>,
    pub extractor: Arc<dyn TextExtractor>,
    pub skill_map: SkillCompanyMap,
    /// Only one analysis run at a time.
    pub gate: AnalysisGate,
}
