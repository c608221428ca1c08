//! Predicts a job category and its confidence from text cleaned by
//! [`clean_for_classifier`](crate::analysis::normalize::clean_for_classifier).
//!
//! The vectorizer and model were fitted on text cleaned that way, so the adapter only
//! accepts [`CleanedText`] and never cleans anything itself.

use std::path::Path;

use tracing::{error, info};

use crate::analysis::model::{LinearCategoryModel, TfidfVectorizer};
use crate::analysis::normalize::CleanedText;
use crate::analysis::{round_to_hundredths, AnalysisError};

/// Turns cleaned text into a feature vector.
pub trait TextVectorizer: Send + Sync {
    fn feature_count(&self) -> usize;
    fn vectorize(&self, text: &CleanedText) -> Vec<f64>;
}

/// A fitted multi-class model over vectorizer features.
pub trait CategoryModel: Send + Sync {
    fn classes(&self) -> &[String];
    fn feature_count(&self) -> usize;
    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, AnalysisError>;

    fn predict(&self, features: &[f64]) -> Result<String, AnalysisError> {
        let proba = self.predict_proba(features)?;
        let best = argmax(&proba)
            .ok_or_else(|| AnalysisError::Inference("empty probability distribution".into()))?;
        self.classes()
            .get(best)
            .cloned()
            .ok_or_else(|| AnalysisError::Inference(format!("no class at index {best}")))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    pub category: String,
    pub confidence: f64, // 0 – 100
}

pub struct ClassifierAdapter {
    vectorizer: Option<Box<dyn TextVectorizer>>,
    model: Option<Box<dyn CategoryModel>>,
}

impl ClassifierAdapter {
    pub fn new(
        vectorizer: Option<Box<dyn TextVectorizer>>,
        model: Option<Box<dyn CategoryModel>>,
    ) -> Self {
        Self { vectorizer, model }
    }

    /// Loads both artifacts. A failed load is logged and leaves that half unloaded;
    /// the service keeps running and reports it through the health endpoint.
    pub fn from_files(model_path: impl AsRef<Path>, vectorizer_path: impl AsRef<Path>) -> Self {
        let vectorizer: Option<Box<dyn TextVectorizer>> =
            match TfidfVectorizer::from_path(vectorizer_path.as_ref()) {
                Ok(v) => {
                    info!("Vectorizer loaded ({} features)", v.feature_count());
                    Some(Box::new(v))
                }
                Err(e) => {
                    error!("Error loading vectorizer: {e:#}");
                    None
                }
            };

        let model: Option<Box<dyn CategoryModel>> =
            match LinearCategoryModel::from_path(model_path.as_ref()) {
                Ok(m) => {
                    info!("Classifier loaded ({} categories)", m.classes().len());
                    Some(Box::new(m))
                }
                Err(e) => {
                    error!("Error loading classifier: {e:#}");
                    None
                }
            };

        Self::new(vectorizer, model)
    }

    pub fn model_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn vectorizer_loaded(&self) -> bool {
        self.vectorizer.is_some()
    }

    pub fn classify(&self, text: &CleanedText) -> Result<ClassificationResult, AnalysisError> {
        let (Some(vectorizer), Some(model)) = (&self.vectorizer, &self.model) else {
            return Err(AnalysisError::ModelUnavailable);
        };

        if vectorizer.feature_count() != model.feature_count() {
            return Err(AnalysisError::Inference(format!(
                "vectorizer produces {} features but model expects {}",
                vectorizer.feature_count(),
                model.feature_count()
            )));
        }

        let features = vectorizer.vectorize(text);
        let category = model.predict(&features)?;
        let proba = model.predict_proba(&features)?;
        let max_proba = proba.iter().copied().fold(0.0_f64, f64::max);

        Ok(ClassificationResult {
            category,
            confidence: round_to_hundredths((max_proba * 100.0).clamp(0.0, 100.0)),
        })
    }
}

/// Index of the first maximum.
fn argmax(values: &[f64]) -> Option<usize> {
    // max_by keeps the last of equal elements, so walk backwards.
    values
        .iter()
        .enumerate()
        .rev()
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(idx, _)| idx)
}
