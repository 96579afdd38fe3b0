use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_ats::analysis::extractor::PdfTextExtractor;
use resume_ats::analysis::gate::AnalysisGate;
use resume_ats::analysis::skills::SkillCompanyMap;
use resume_ats::config::Config;
use resume_ats::errors::SetupError;
use resume_ats::llm_client::{self, LlmClient};
use resume_ats::routes::build_router;
use resume_ats::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on a missing GOOGLE_API_KEY)
    let config = Config::from_env().map_err(SetupError::from)?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume ATS service v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm =
        LlmClient::new(config.google_api_key.clone()).map_err(SetupError::ApiConfiguration)?;
    if config.verify_api_key {
        llm.verify().await.map_err(SetupError::ApiConfiguration)?;
        info!("Gemini API key verified");
    }
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let state = AppState {
        scorer: Arc::new(llm),
        extractor: Arc::new(PdfTextExtractor),
        skill_map: SkillCompanyMap::builtin(),
        gate: AnalysisGate::new(),
    };

    let app = build_router(state, config.max_upload_bytes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
