mod analysis;
mod config;
mod errors;
mod routes;
mod state;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::classifier::ClassifierAdapter;
use crate::analysis::extract::PdfTextExtractor;
use crate::analysis::orchestrator::Analyzer;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ATS API v{}", env!("CARGO_PKG_VERSION"));

    // Missing artifacts leave the classifier unloaded; /health reports it.
    let classifier = ClassifierAdapter::from_files(&config.model_path, &config.vectorizer_path);
    if classifier.model_loaded() && classifier.vectorizer_loaded() {
        info!("Model and vectorizer loaded successfully");
    }

    let analyzer = Arc::new(Analyzer::new(classifier, Box::new(PdfTextExtractor)));

    let cors = build_cors(&config)?;

    let state = AppState {
        analyzer,
        config: config.clone(),
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// CORS from `ALLOWED_ORIGINS`: `*` allows any origin, otherwise an exact list.
fn build_cors(config: &Config) -> Result<CorsLayer> {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    let Some(origins) = config.origin_list() else {
        info!("CORS: allowing any origin");
        return Ok(cors.allow_origin(Any));
    };

    let origins = origins
        .iter()
        .map(|o| {
            HeaderValue::from_str(o).with_context(|| format!("Invalid origin in ALLOWED_ORIGINS: {o}"))
        })
        .collect::<Result<Vec<_>>>()?;
    info!("CORS: allowing {} origin(s)", origins.len());
    Ok(cors.allow_origin(AllowOrigin::list(origins)))
}
