pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::ai::handlers as ai_handlers;
use crate::parsing::handlers as parse_handlers;
use crate::state::AppState;

/// Room for multipart boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        // Resume parsing
        .route(
            "/api/v1/resumes/parse",
            post(parse_handlers::handle_parse_upload),
        )
        .route(
            "/api/v1/resumes/parse-text",
            post(parse_handlers::handle_parse_text),
        )
        // AI suggestions
        .route("/api/v1/ai/summary", post(ai_handlers::handle_summary))
        .route("/api/v1/ai/enhance", post(ai_handlers::handle_enhance))
        .route("/api/v1/ai/skills", post(ai_handlers::handle_skills))
        .route("/api/v1/ai/ats-score", post(ai_handlers::handle_ats_score))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
