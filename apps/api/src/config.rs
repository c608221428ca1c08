use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every field has a default; only malformed numeric values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Comma-separated origin list, or `*` for any origin.
    pub allowed_origins: String,
    pub model_path: String,
    pub vectorizer_path: String,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: env_or("PORT", "5000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            allowed_origins: env_or("ALLOWED_ORIGINS", "*"),
            model_path: env_or("MODEL_PATH", "resume_classifier.json"),
            vectorizer_path: env_or("VECTORIZER_PATH", "tfidf_vectorizer.json"),
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", "10485760")
                .parse::<usize>()
                .context("MAX_UPLOAD_BYTES must be a positive integer")?,
        })
    }

    /// Parsed origin list. `None` means any origin is allowed.
    pub fn origin_list(&self) -> Option<Vec<String>> {
        let origins: Vec<String> = self
            .allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(String::from)
            .collect();
        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            None
        } else {
            Some(origins)
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
