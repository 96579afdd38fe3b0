//! Presentation of an analysis run: the JSON response body and its markdown rendering.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::analysis::ranking::{AnalysisResult, RankedResultSet};
use crate::analysis::skills::{CompanyMatch, SkillCompanyMap};

pub const NO_MISSING_KEYWORDS: &str = "No missing keywords";
pub const NO_COMPANY_MATCH: &str = "No companies match the listed skills.";

#[derive(Debug, Clone, Serialize)]
pub struct RankedResultView {
    pub rank: usize,
    #[serde(flatten)]
    pub result: AnalysisResult,
    pub matched_companies: CompanyMatch,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub run_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub total_resumes: usize,
    pub displayed: usize,
    pub results: Vec<RankedResultView>,
}

/// Builds the view of the top `display_count` results.
///
/// Each result is matched on its own extracted skills followed by the user's skills.
pub fn build_report(
    ranked: &RankedResultSet,
    display_count: usize,
    user_skills: &[String],
    skill_map: &SkillCompanyMap,
) -> AnalysisReport {
    let results: Vec<RankedResultView> = ranked
        .top(display_count)
        .iter()
        .enumerate()
        .map(|(idx, result)| {
            let mut skills = result.extracted_skills.clone();
            skills.extend(user_skills.iter().cloned());
            RankedResultView {
                rank: idx + 1,
                result: result.clone(),
                matched_companies: skill_map.match_companies(&skills),
            }
        })
        .collect();

    AnalysisReport {
        run_id: Uuid::new_v4(),
        analyzed_at: Utc::now(),
        total_resumes: ranked.len(),
        displayed: results.len(),
        results,
    }
}

/// Renders the report as markdown, one section per displayed resume.
pub fn render_markdown(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "# Resume analysis\n\nShowing {} of {} resumes.",
        report.displayed, report.total_resumes
    );

    for view in &report.results {
        let r = &view.result;
        let _ = writeln!(out, "\n## Resume {} ({})\n", view.rank, r.source_document);
        let _ = writeln!(out, "**Match Score**: {}", format_score(r.match_score));
        let _ = writeln!(out, "**Profile Summary**: {}", r.profile_summary);
        let missing = if r.missing_keywords.is_empty() {
            NO_MISSING_KEYWORDS.to_string()
        } else {
            r.missing_keywords.join(", ")
        };
        let _ = writeln!(out, "**Missing Keywords**: {missing}");
        let _ = writeln!(out, "**Extracted Skills**: {}", r.extracted_skills.join(", "));
        let companies = match &view.matched_companies {
            CompanyMatch::Matched(set) => set.iter().cloned().collect::<Vec<_>>().join(", "),
            CompanyMatch::NoMatch => NO_COMPANY_MATCH.to_string(),
        };
        let _ = writeln!(out, "**Matched Companies**: {companies}");
    }

    out
}

/// Whole scores print without a trailing ".0".
fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{score:.0}")
    } else {
        format!("{score}")
    }
}
