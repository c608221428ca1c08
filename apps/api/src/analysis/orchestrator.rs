//! Runs one résumé analysis per request, with no state kept between calls.
//!
//! Full analysis: extract → (clean → classify) + (normalize both sides → score).
//! Score-only: normalize both sides → score.

use tracing::debug;

use crate::analysis::classifier::{ClassificationResult, ClassifierAdapter};
use crate::analysis::extract::TextExtractor;
use crate::analysis::keyword_scoring::{score_keywords, ScoreResult};
use crate::analysis::normalize::{clean_for_classifier, normalize_for_ats};
use crate::analysis::AnalysisError;

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub score: ScoreResult,
    pub classification: ClassificationResult,
    /// Extracted text length, in characters.
    pub resume_text_length: usize,
    /// Classifier input length, in characters.
    pub cleaned_text_length: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthStatus {
    pub model_loaded: bool,
    pub vectorizer_loaded: bool,
}

pub struct Analyzer {
    classifier: ClassifierAdapter,
    extractor: Box<dyn TextExtractor>,
}

impl Analyzer {
    pub fn new(classifier: ClassifierAdapter, extractor: Box<dyn TextExtractor>) -> Self {
        Self {
            classifier,
            extractor,
        }
    }

    pub fn health_status(&self) -> HealthStatus {
        HealthStatus {
            model_loaded: self.classifier.model_loaded(),
            vectorizer_loaded: self.classifier.vectorizer_loaded(),
        }
    }

    pub fn score_only(
        &self,
        job_description: &str,
        resume_text: &str,
    ) -> Result<ScoreResult, AnalysisError> {
        require_text(job_description, "job_description")?;
        require_text(resume_text, "resume_text")?;

        let result = score_keywords(
            &normalize_for_ats(job_description),
            &normalize_for_ats(resume_text),
        );
        debug!(
            score = result.score,
            matched = result.matched_count,
            total = result.total_job_keywords,
            "Score-only analysis complete"
        );
        Ok(result)
    }

    /// An empty extraction is reported before the job description is checked, so a
    /// blank document always surfaces as `EmptyExtractedText`.
    pub fn analyze_full(
        &self,
        job_description: &str,
        document: &[u8],
    ) -> Result<AnalysisResult, AnalysisError> {
        if document.is_empty() {
            return Err(AnalysisError::MissingInput("resume_file"));
        }

        let resume_text = self.extractor.extract(document)?;
        if resume_text.trim().is_empty() {
            return Err(AnalysisError::EmptyExtractedText);
        }
        require_text(job_description, "job_description")?;

        let cleaned = clean_for_classifier(&resume_text);
        let classification = self.classifier.classify(&cleaned)?;

        let score = score_keywords(
            &normalize_for_ats(job_description),
            &normalize_for_ats(&resume_text),
        );

        debug!(
            category = %classification.category,
            confidence = classification.confidence,
            score = score.score,
            "Full analysis complete"
        );

        Ok(AnalysisResult {
            score,
            classification,
            resume_text_length: resume_text.chars().count(),
            cleaned_text_length: cleaned.char_len(),
        })
    }
}

fn require_text(value: &str, field: &'static str) -> Result<(), AnalysisError> {
    if value.trim().is_empty() {
        Err(AnalysisError::MissingInput(field))
    } else {
        Ok(())
    }
}
