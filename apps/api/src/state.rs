use std::sync::Arc;

use crate::analysis::orchestrator::Analyzer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Read-only after startup; shared by every request.
    pub analyzer: Arc<Analyzer>,
    pub config: Config,
}
