// Resume analysis: PDF extraction, prompt building, Gemini scoring,
// response parsing, ranking and skill → company matching.
// All LLM calls go through llm_client.

use thiserror::Error;

use crate::analysis::parser::ParseError;
use crate::llm_client::LlmError;

pub mod extractor;
pub mod gate;
pub mod handlers;
pub mod parser;
pub mod pipeline;
pub mod prompts;
pub mod ranking;
pub mod report;
pub mod skills;

/// Failure of one document during an analysis run. Aborts the whole run.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Failed to extract text from '{document}': {reason}")]
    Extraction { document: String, reason: String },

    #[error("Scoring request for '{document}' failed: {source}")]
    Scoring {
        document: String,
        #[source]
        source: LlmError,
    },

    #[error("Could not parse the evaluation for '{document}': {source}")]
    Parse {
        document: String,
        #[source]
        source: ParseError,
    },
}
