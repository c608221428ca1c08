use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /
/// Lists the available endpoints.
pub async fn index_handler() -> Json<Value> {
    Json(json!({
        "message": "ATS Scoring API is running!",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health",
            "analyze_resume": "/analyze-resume (POST)",
            "calculate_ats_only": "/calculate-ats-only (POST)"
        }
    }))
}

/// GET /health
/// Reports whether the classifier artifacts were loaded at startup.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let health = state.analyzer.health_status();
    Json(json!({
        "status": "healthy",
        "model_loaded": health.model_loaded,
        "vectorizer_loaded": health.vectorizer_loaded
    }))
}
