// Résumé analysis core: text normalization, keyword scoring, category classification.
// Handlers are the only HTTP-aware module here; everything else is plain sync code.

pub mod classifier;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod keyword_scoring;
pub mod model;
pub mod normalize;
pub mod orchestrator;
pub mod stopwords;

pub use error::AnalysisError;

/// Rounds to 2 decimal places, half away from zero.
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
