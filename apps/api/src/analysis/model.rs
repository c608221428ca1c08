//! File-backed classifier collaborators.
//!
//! Both artifacts are JSON exports of a fitted TF-IDF vectorizer and a multinomial
//! linear classifier:
//!
//! ```json
//! // vectorizer
//! { "vocabulary": { "python": 0, "sql": 1 }, "idf": [1.4, 2.1], "sublinear_tf": false, "norm": "l2" }
//! // model
//! { "classes": ["Data Science", "Web"], "coef": [[0.9, 1.2], [-0.3, 0.1]], "intercept": [0.0, 0.2] }
//! ```

use std::collections::HashMap;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::analysis::classifier::{CategoryModel, TextVectorizer};
use crate::analysis::normalize::CleanedText;
use crate::analysis::AnalysisError;

static VECTORIZER_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("valid vectorizer token regex"));

// ────────────────────────────────────────────────────────────────────────────
// TF-IDF vectorizer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    #[default]
    L2,
    None,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    #[serde(default)]
    sublinear_tf: bool,
    #[serde(default)]
    norm: Norm,
}

impl TfidfVectorizer {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read vectorizer file {}", path.display()))?;
        let vectorizer: TfidfVectorizer = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid vectorizer JSON in {}", path.display()))?;
        vectorizer.validate()?;
        Ok(vectorizer)
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            self.idf.len() == self.vocabulary.len(),
            "idf has {} entries but vocabulary has {} terms",
            self.idf.len(),
            self.vocabulary.len()
        );
        if let Some((term, idx)) = self.vocabulary.iter().find(|(_, idx)| **idx >= self.idf.len()) {
            anyhow::bail!("vocabulary term '{term}' maps to out-of-range column {idx}");
        }
        Ok(())
    }
}

impl TextVectorizer for TfidfVectorizer {
    fn feature_count(&self) -> usize {
        self.idf.len()
    }

    fn vectorize(&self, text: &CleanedText) -> Vec<f64> {
        let mut features = vec![0.0_f64; self.idf.len()];
        for token in VECTORIZER_TOKEN_RE.find_iter(text.as_str()) {
            if let Some(&idx) = self.vocabulary.get(token.as_str()) {
                features[idx] += 1.0;
            }
        }

        for (idx, value) in features.iter_mut().enumerate() {
            if *value > 0.0 {
                let tf = if self.sublinear_tf { 1.0 + value.ln() } else { *value };
                *value = tf * self.idf[idx];
            }
        }

        if self.norm == Norm::L2 {
            let length = features.iter().map(|v| v * v).sum::<f64>().sqrt();
            if length > 0.0 {
                features.iter_mut().for_each(|v| *v /= length);
            }
        }
        features
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Linear category model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct LinearCategoryModel {
    classes: Vec<String>,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
}

impl LinearCategoryModel {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read model file {}", path.display()))?;
        let model: LinearCategoryModel = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid model JSON in {}", path.display()))?;
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<()> {
        ensure!(!self.classes.is_empty(), "model has no classes");
        ensure!(
            self.coef.len() == self.classes.len() && self.intercept.len() == self.classes.len(),
            "expected {} coefficient rows and intercepts, found {} and {}",
            self.classes.len(),
            self.coef.len(),
            self.intercept.len()
        );
        let width = self.coef[0].len();
        ensure!(
            self.coef.iter().all(|row| row.len() == width),
            "coefficient rows have inconsistent widths"
        );
        Ok(())
    }

    fn softmax(logits: &[f64]) -> Vec<f64> {
        let max_logit = logits.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
        let exp_logits: Vec<f64> = logits.iter().map(|&x| (x - max_logit).exp()).collect();
        let sum_exp: f64 = exp_logits.iter().sum();

        exp_logits.iter().map(|&x| x / sum_exp).collect()
    }
}

impl CategoryModel for LinearCategoryModel {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn feature_count(&self) -> usize {
        self.coef[0].len()
    }

    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, AnalysisError> {
        if features.len() != self.feature_count() {
            return Err(AnalysisError::Inference(format!(
                "model expects {} features, got {}",
                self.feature_count(),
                features.len()
            )));
        }
        let logits: Vec<f64> = self
            .coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, b)| row.iter().zip(features).map(|(w, x)| w * x).sum::<f64>() + b)
            .collect();
        Ok(Self::softmax(&logits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::normalize::clean_for_classifier;
    use std::io::Write;

    fn write_json(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn vectorizer(sublinear_tf: bool, norm: Norm) -> TfidfVectorizer {
        TfidfVectorizer {
            vocabulary: HashMap::from([("python".to_string(), 0), ("sql".to_string(), 1)]),
            idf: vec![1.0, 2.0],
            sublinear_tf,
            norm,
        }
    }

    #[test]
    fn test_vectorize_counts_times_idf_without_norm() {
        let v = vectorizer(false, Norm::None);
        let features = v.vectorize(&clean_for_classifier("python python sql unknown"));
        assert_eq!(features, vec![2.0, 2.0]);
    }

    #[test]
    fn test_vectorize_l2_normalizes() {
        let v = vectorizer(false, Norm::L2);
        let features = v.vectorize(&clean_for_classifier("python sql sql"));
        let length: f64 = features.iter().map(|x| x * x).sum::<f64>().sqrt();
        assert!((length - 1.0).abs() < 1e-9);
        assert!(features[1] > features[0]);
    }

    #[test]
    fn test_vectorize_sublinear_tf() {
        let v = vectorizer(true, Norm::None);
        let features = v.vectorize(&clean_for_classifier("python python"));
        assert!((features[0] - (1.0 + 2f64.ln())).abs() < 1e-9);
        assert_eq!(features[1], 0.0);
    }

    #[test]
    fn test_vectorize_empty_text_is_zero_vector() {
        let v = vectorizer(false, Norm::L2);
        assert_eq!(v.vectorize(&clean_for_classifier("")), vec![0.0, 0.0]);
    }

    #[test]
    fn test_vectorizer_loads_from_file_with_defaults() {
        let file = write_json(r#"{"vocabulary": {"rust": 0}, "idf": [1.5]}"#);
        let v = TfidfVectorizer::from_path(file.path()).unwrap();
        assert_eq!(v.feature_count(), 1);
        assert_eq!(v.norm, Norm::L2);
        assert!(!v.sublinear_tf);
    }

    #[test]
    fn test_vectorizer_rejects_idf_length_mismatch() {
        let file = write_json(r#"{"vocabulary": {"rust": 0, "go": 1}, "idf": [1.5]}"#);
        assert!(TfidfVectorizer::from_path(file.path()).is_err());
    }

    #[test]
    fn test_vectorizer_rejects_out_of_range_column() {
        let file = write_json(r#"{"vocabulary": {"rust": 0, "go": 5}, "idf": [1.0, 1.0]}"#);
        assert!(TfidfVectorizer::from_path(file.path()).is_err());
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(TfidfVectorizer::from_path("/nonexistent/vectorizer.json").is_err());
        assert!(LinearCategoryModel::from_path("/nonexistent/model.json").is_err());
    }

    #[test]
    fn test_model_loads_and_predicts_probabilities() {
        let file = write_json(
            r#"{"classes": ["Data", "Web"], "coef": [[2.0, 0.0], [0.0, 2.0]], "intercept": [0.0, 0.0]}"#,
        );
        let model = LinearCategoryModel::from_path(file.path()).unwrap();
        let proba = model.predict_proba(&[1.0, 0.0]).unwrap();
        assert_eq!(proba.len(), 2);
        assert!((proba.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!(proba[0] > proba[1]);
        assert_eq!(model.predict(&[1.0, 0.0]).unwrap(), "Data");
    }

    #[test]
    fn test_model_rejects_row_count_mismatch() {
        let file = write_json(r#"{"classes": ["A", "B"], "coef": [[1.0]], "intercept": [0.0, 0.0]}"#);
        assert!(LinearCategoryModel::from_path(file.path()).is_err());
    }

    #[test]
    fn test_model_rejects_ragged_rows() {
        let file = write_json(
            r#"{"classes": ["A", "B"], "coef": [[1.0, 2.0], [1.0]], "intercept": [0.0, 0.0]}"#,
        );
        assert!(LinearCategoryModel::from_path(file.path()).is_err());
    }

    #[test]
    fn test_model_width_mismatch_is_inference_error() {
        let model = LinearCategoryModel {
            classes: vec!["A".into()],
            coef: vec![vec![1.0, 1.0]],
            intercept: vec![0.0],
        };
        assert!(matches!(
            model.predict_proba(&[1.0]),
            Err(AnalysisError::Inference(_))
        ));
    }

    #[test]
    fn test_softmax_is_stable_for_large_logits() {
        let proba = LinearCategoryModel::softmax(&[1000.0, 1000.0]);
        assert!((proba[0] - 0.5).abs() < 1e-9);
    }
}
