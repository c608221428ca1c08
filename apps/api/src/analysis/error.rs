use thiserror::Error;

/// Failures surfaced by the analysis core. Each variant carries a stable
/// discriminator (see [`AnalysisError::code`]) so the HTTP layer can pick a status.
#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    #[error("{0} is required")]
    MissingInput(&'static str),

    #[error("Could not extract text from the document")]
    EmptyExtractedText,

    #[error("Document could not be read: {0}")]
    ExtractionFailed(String),

    #[error("Classifier model or vectorizer not loaded")]
    ModelUnavailable,

    #[error("Classification failed: {0}")]
    Inference(String),
}

impl AnalysisError {
    pub fn code(&self) -> &'static str {
        match self {
            AnalysisError::MissingInput(_) => "MISSING_INPUT",
            AnalysisError::EmptyExtractedText => "EMPTY_EXTRACTED_TEXT",
            AnalysisError::ExtractionFailed(_) => "EXTRACTION_FAILED",
            AnalysisError::ModelUnavailable => "MODEL_UNAVAILABLE",
            AnalysisError::Inference(_) => "INFERENCE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_message_names_field() {
        let err = AnalysisError::MissingInput("job_description");
        assert_eq!(err.to_string(), "job_description is required");
        assert_eq!(err.code(), "MISSING_INPUT");
    }

    #[test]
    fn test_codes_are_distinct() {
        let codes = [
            AnalysisError::MissingInput("x").code(),
            AnalysisError::EmptyExtractedText.code(),
            AnalysisError::ExtractionFailed(String::new()).code(),
            AnalysisError::ModelUnavailable.code(),
            AnalysisError::Inference(String::new()).code(),
        ];
        let mut deduped = codes.to_vec();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), codes.len());
    }
}
