//! Response parser: turns the raw Gemini text into a typed `Evaluation`.
//!
//! Only key presence and field types are checked. Absent (or `null`) keys
//! fall back to: score 0, summary "N/A", empty keyword and skill lists.

use serde::{de, Deserialize, Deserializer};
use thiserror::Error;

use crate::llm_client::strip_json_fences;

pub const DEFAULT_SUMMARY: &str = "N/A";

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("response is not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("response is not a JSON object")]
    NotAnObject,

    #[error("response has a field of the wrong type: {0}")]
    Schema(#[source] serde_json::Error),
}

/// Typed evaluation of one resume against the JD.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub match_score: f64,
    pub profile_summary: String,
    pub missing_keywords: Vec<String>,
    pub extracted_skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ScoringResponse {
    #[serde(rename = "JD Match", default, deserialize_with = "deserialize_score")]
    jd_match: Option<f64>,
    #[serde(rename = "MissingKeywords", default)]
    missing_keywords: Option<Vec<String>>,
    #[serde(rename = "Profile Summary", default)]
    profile_summary: Option<String>,
    #[serde(rename = "Extracted Skills", default)]
    extracted_skills: Option<Vec<String>>,
}

impl From<ScoringResponse> for Evaluation {
    fn from(raw: ScoringResponse) -> Self {
        Evaluation {
            match_score: raw.jd_match.unwrap_or(0.0),
            profile_summary: raw
                .profile_summary
                .unwrap_or_else(|| DEFAULT_SUMMARY.to_string()),
            missing_keywords: raw.missing_keywords.unwrap_or_default(),
            extracted_skills: raw.extracted_skills.unwrap_or_default(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScoreValue {
    Number(f64),
    Text(String),
}

/// Accepts `85`, `85.5`, `"85"` and `"85%"`.
fn deserialize_score<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<ScoreValue>::deserialize(deserializer)? {
        None => Ok(None),
        Some(ScoreValue::Number(n)) => Ok(Some(n)),
        Some(ScoreValue::Text(s)) => parse_score_text(&s)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("\"JD Match\" is not numeric: '{s}'"))),
    }
}

fn parse_score_text(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    number.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parses the raw model output. Code fences around the JSON are tolerated.
pub fn parse_evaluation(raw: &str) -> Result<Evaluation, ParseError> {
    let value: serde_json::Value =
        serde_json::from_str(strip_json_fences(raw)).map_err(ParseError::Malformed)?;

    if !value.is_object() {
        return Err(ParseError::NotAnObject);
    }

    let response: ScoringResponse = serde_json::from_value(value).map_err(ParseError::Schema)?;
    Ok(response.into())
}
