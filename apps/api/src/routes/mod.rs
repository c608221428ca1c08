pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;
    Router::new()
        .route("/", get(health::index_handler))
        .route("/health", get(health::health_handler))
        .route("/analyze-resume", post(handlers::handle_analyze_resume))
        .route("/calculate-ats-only", post(handlers::handle_calculate_ats_only))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
