//! Axum route handlers for the Analysis API.

use std::collections::BTreeMap;

use axum::{
    extract::{Multipart, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analysis::extractor::{has_pdf_extension, ResumeDocument};
use crate::analysis::pipeline::run_analysis;
use crate::analysis::ranking::resolve_display_count;
use crate::analysis::report::{build_report, render_markdown};
use crate::analysis::skills::{parse_skill_list, CompanyMatch};
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Json,
    Markdown,
}

#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeQuery {
    #[serde(default)]
    pub format: ReportFormat,
}

/// Fields collected from the multipart analysis form.
#[derive(Debug, Default)]
pub struct AnalyzeForm {
    pub job_description: String,
    pub resumes: Vec<ResumeDocument>,
    pub skills: Vec<String>,
    pub top_n: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct MatchSkillsRequest {
    pub skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct MatchSkillsResponse {
    pub skills: Vec<String>,
    pub matched_companies: CompanyMatch,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Multipart form: `job_description`, one or more `resumes` (PDF), `skills`
/// (comma-separated), optional `top_n`. `?format=markdown` returns the text report.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Query(query): Query<AnalyzeQuery>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let form = read_analyze_form(multipart).await?;

    if form.job_description.trim().is_empty() || form.resumes.is_empty() {
        return Err(AppError::Validation(
            "Please enter a job description and upload at least one resume.".to_string(),
        ));
    }

    let _permit = state.gate.try_begin().ok_or_else(|| {
        warn!("Rejected analysis request: a run is already in progress");
        AppError::AnalysisInProgress
    })?;

    info!("Analyzing {} resume(s)", form.resumes.len());

    let ranked = run_analysis(
        &form.resumes,
        &form.job_description,
        state.extractor.as_ref(),
        state.scorer.as_ref(),
    )
    .await?;

    let display_count = resolve_display_count(form.top_n, ranked.len());
    let report = build_report(&ranked, display_count, &form.skills, &state.skill_map);

    info!(
        "Analysis run {} complete: {} ranked, {} displayed",
        report.run_id, report.total_resumes, report.displayed
    );

    let response = match query.format {
        ReportFormat::Json => Json(report).into_response(),
        ReportFormat::Markdown => (
            [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
            render_markdown(&report),
        )
            .into_response(),
    };
    Ok(response)
}

/// POST /api/v1/skills/match
///
/// Matches a skill list against the company table without running an analysis.
pub async fn handle_match_skills(
    State(state): State<AppState>,
    Json(request): Json<MatchSkillsRequest>,
) -> Json<MatchSkillsResponse> {
    let skills: Vec<String> = request
        .skills
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();
    let matched_companies = state.skill_map.match_companies(&skills);

    Json(MatchSkillsResponse {
        skills,
        matched_companies,
    })
}

/// GET /api/v1/skills/companies
pub async fn handle_list_skill_companies(
    State(state): State<AppState>,
) -> Json<BTreeMap<&'static str, Vec<&'static str>>> {
    Json(
        state
            .skill_map
            .entries()
            .map(|(keyword, companies)| (keyword, companies.to_vec()))
            .collect(),
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Form parsing
// ────────────────────────────────────────────────────────────────────────────

async fn read_analyze_form(mut multipart: Multipart) -> Result<AnalyzeForm, AppError> {
    let mut form = AnalyzeForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "job_description" => {
                form.job_description = field.text().await.map_err(invalid_field(&name))?;
            }
            "resumes" | "resume" => {
                let file_name = field.file_name().unwrap_or("resume.pdf").to_string();
                if !has_pdf_extension(&file_name) {
                    return Err(AppError::Validation(format!(
                        "Only PDF files are allowed: '{file_name}'"
                    )));
                }
                let data = field.bytes().await.map_err(invalid_field(&name))?;
                form.resumes.push(ResumeDocument::new(file_name, data));
            }
            "skills" => {
                let raw = field.text().await.map_err(invalid_field(&name))?;
                form.skills = parse_skill_list(&raw);
            }
            "top_n" => {
                let raw = field.text().await.map_err(invalid_field(&name))?;
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    let n = trimmed.parse::<usize>().map_err(|_| {
                        AppError::Validation(format!("top_n must be a positive integer, got '{trimmed}'"))
                    })?;
                    form.top_n = Some(n);
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

fn invalid_field(name: &str) -> impl Fn(axum::extract::multipart::MultipartError) -> AppError + '_ {
    move |e| AppError::Validation(format!("Invalid form field '{name}': {e}"))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::analysis::gate::AnalysisGate;
    use crate::analysis::pipeline::test_support::{ScriptedScorer, Utf8Extractor};
    use crate::analysis::skills::SkillCompanyMap;
    use crate::routes::build_router;
    use crate::state::AppState;

    const BOUNDARY: &str = "resume-ats-test-boundary";

    enum Part<'a> {
        Text(&'a str, &'a str),
        File(&'a str, &'a str, &'a str),
    }

    fn multipart_body(parts: &[Part]) -> String {
        let mut body = String::new();
        for part in parts {
            body.push_str(&format!("--{BOUNDARY}\r\n"));
            match part {
                Part::Text(name, value) => {
                    body.push_str(&format!(
                        "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                    ));
                }
                Part::File(name, file_name, content) => {
                    body.push_str(&format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: application/pdf\r\n\r\n{content}\r\n"
                    ));
                }
            }
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        body
    }

    fn analyze_request(uri: &str, parts: &[Part]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap()
    }

    fn app_with(scorer: Arc<ScriptedScorer>, gate: AnalysisGate) -> Router {
        let state = AppState {
            scorer,
            extractor: Arc::new(Utf8Extractor),
            skill_map: SkillCompanyMap::builtin(),
            gate,
        };
        build_router(state, 1024 * 1024)
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_analyze_ranks_and_matches_companies() {
        let scorer = Arc::new(ScriptedScorer::replying(&[
            r#"{"JD Match": 40, "MissingKeywords": ["java"], "Profile Summary": "Junior", "Extracted Skills": ["HTML"]}"#,
            r#"{"JD Match": 88, "MissingKeywords": [], "Profile Summary": "Strong", "Extracted Skills": ["Python", "SQL"]}"#,
        ]));
        let app = app_with(scorer.clone(), AnalysisGate::new());

        let response = app
            .oneshot(analyze_request(
                "/api/v1/analyze",
                &[
                    Part::Text("job_description", "Need Python and Java developer"),
                    Part::File("resumes", "first.pdf", "HTML and CSS"),
                    Part::File("resumes", "second.pdf", "Python and SQL"),
                    Part::Text("skills", ""),
                ],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["total_resumes"], 2);
        assert_eq!(body["displayed"], 2);
        let top = &body["results"][0];
        assert_eq!(top["source_document"], "second.pdf");
        assert_eq!(top["match_score"], 88.0);
        let companies: Vec<&str> = top["matched_companies"]["companies"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        for expected in ["Capgemini", "DeepSeek", "Google", "Microsoft"] {
            assert!(companies.contains(&expected), "missing {expected}");
        }
        assert_eq!(scorer.calls(), 2);
    }

    #[tokio::test]
    async fn test_top_n_clamped_to_upload_count() {
        let scorer = Arc::new(ScriptedScorer::replying(&["{}"]));
        let app = app_with(scorer, AnalysisGate::new());

        let response = app
            .oneshot(analyze_request(
                "/api/v1/analyze",
                &[
                    Part::Text("job_description", "Backend role"),
                    Part::File("resumes", "only.pdf", "text"),
                    Part::Text("top_n", "7"),
                ],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["displayed"], 1);
        assert_eq!(body["results"][0]["profile_summary"], "N/A");
        assert_eq!(body["results"][0]["matched_companies"]["status"], "no_match");
    }

    #[tokio::test]
    async fn test_missing_job_description_rejected() {
        let scorer = Arc::new(ScriptedScorer::replying(&[]));
        let app = app_with(scorer.clone(), AnalysisGate::new());

        let response = app
            .oneshot(analyze_request(
                "/api/v1/analyze",
                &[Part::File("resumes", "a.pdf", "text")],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(scorer.calls(), 0);
    }

    #[tokio::test]
    async fn test_non_pdf_upload_rejected() {
        let scorer = Arc::new(ScriptedScorer::replying(&[]));
        let app = app_with(scorer, AnalysisGate::new());

        let response = app
            .oneshot(analyze_request(
                "/api/v1/analyze",
                &[
                    Part::Text("job_description", "jd"),
                    Part::File("resumes", "resume.docx", "text"),
                ],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_concurrent_run_rejected_with_conflict() {
        let scorer = Arc::new(ScriptedScorer::replying(&["{}"]));
        let gate = AnalysisGate::new();
        let app = app_with(scorer.clone(), gate.clone());
        let _running = gate.try_begin().unwrap();

        let response = app
            .oneshot(analyze_request(
                "/api/v1/analyze",
                &[
                    Part::Text("job_description", "jd"),
                    Part::File("resumes", "a.pdf", "text"),
                ],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(json_body(response).await["error"]["code"], "ANALYSIS_IN_PROGRESS");
        assert_eq!(scorer.calls(), 0);
    }

    #[tokio::test]
    async fn test_parse_failure_surfaces_and_releases_gate() {
        let scorer = Arc::new(ScriptedScorer::replying(&["I think this resume is great!"]));
        let gate = AnalysisGate::new();
        let app = app_with(scorer, gate.clone());

        let response = app
            .oneshot(analyze_request(
                "/api/v1/analyze",
                &[
                    Part::Text("job_description", "jd"),
                    Part::File("resumes", "a.pdf", "text"),
                ],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(json_body(response).await["error"]["code"], "PARSE_ERROR");
        assert!(!gate.is_running());
    }

    #[tokio::test]
    async fn test_markdown_format() {
        let scorer = Arc::new(ScriptedScorer::replying(&[
            r#"{"JD Match": 75, "Extracted Skills": ["java"]}"#,
        ]));
        let app = app_with(scorer, AnalysisGate::new());

        let response = app
            .oneshot(analyze_request(
                "/api/v1/analyze?format=markdown",
                &[
                    Part::Text("job_description", "Java developer"),
                    Part::File("resumes", "a.pdf", "Java"),
                ],
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains("**Match Score**: 75"));
        assert!(text.contains("Capgemini"));
    }

    #[tokio::test]
    async fn test_match_skills_endpoint() {
        let app = app_with(Arc::new(ScriptedScorer::replying(&[])), AnalysisGate::new());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/skills/match")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"skills": [" Python ", "excel", ""]}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["skills"], serde_json::json!(["python", "excel"]));
        assert_eq!(body["matched_companies"]["status"], "matched");
    }

    #[tokio::test]
    async fn test_list_skill_companies() {
        let app = app_with(Arc::new(ScriptedScorer::replying(&[])), AnalysisGate::new());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/skills/companies")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = json_body(response).await;
        assert_eq!(body["python"].as_array().unwrap().len(), 4);
        assert_eq!(body["c"][2], "OpenAI");
    }

    #[tokio::test]
    async fn test_health_reports_running_state() {
        let gate = AnalysisGate::new();
        let app = app_with(Arc::new(ScriptedScorer::replying(&[])), gate.clone());
        let _running = gate.try_begin().unwrap();

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["analysis_running"], true);
    }
}
