//! Document-to-text extraction.
//!
//! A document that cannot be parsed is `ExtractionFailed`, which the API returns as
//! 422 Unprocessable Entity. A document that parses but carries no text is
//! `EmptyExtractedText` (400 Bad Request). Earlier versions of the API reported both
//! cases as 400 "Could not extract text".

use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::warn;

use crate::analysis::AnalysisError;

/// Extracts plain text from uploaded document bytes.
///
/// An unreadable document is `Err(ExtractionFailed)`. A readable document without
/// text is `Ok` with an empty or whitespace-only string.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<String, AnalysisError>;
}

pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, AnalysisError> {
        // pdf-extract panics on some malformed inputs instead of returning an error.
        let outcome = catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes)));

        match outcome {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => {
                warn!("Error extracting text from PDF: {e}");
                Err(AnalysisError::ExtractionFailed(e.to_string()))
            }
            Err(_) => {
                warn!("PDF parser panicked on a {}-byte upload", bytes.len());
                Err(AnalysisError::ExtractionFailed(
                    "document structure is not supported".to_string(),
                ))
            }
        }
    }
}
