pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/analyze", post(handlers::handle_analyze))
        .route("/api/v1/skills/match", post(handlers::handle_match_skills))
        .route(
            "/api/v1/skills/companies",
            get(handlers::handle_list_skill_companies),
        )
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}
