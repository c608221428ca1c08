//! Axum route handlers for the analysis API.

use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, rejection::JsonRejection, Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::analysis::keyword_scoring::ScoreResult;
use crate::analysis::AnalysisError;
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CalculateAtsRequest {
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub resume_text: String,
}

/// Keyword score fields shared by both analysis responses.
#[derive(Debug, Serialize)]
pub struct AtsScoreBody {
    pub ats_score: f64,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub total_job_keywords: usize,
    pub matched_count: usize,
}

impl From<ScoreResult> for AtsScoreBody {
    fn from(score: ScoreResult) -> Self {
        AtsScoreBody {
            ats_score: score.score,
            matched_keywords: score.matched_keywords,
            missing_keywords: score.missing_keywords,
            total_job_keywords: score.total_job_keywords,
            matched_count: score.matched_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CalculateAtsResponse {
    pub success: bool,
    #[serde(flatten)]
    pub ats: AtsScoreBody,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResumeResponse {
    pub success: bool,
    pub predicted_category: String,
    pub confidence: f64,
    #[serde(flatten)]
    pub ats: AtsScoreBody,
    pub resume_text_length: usize,
    pub cleaned_text_length: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /calculate-ats-only
///
/// Keyword score from plain text; no upload, no classification.
pub async fn handle_calculate_ats_only(
    State(state): State<AppState>,
    payload: Result<Json<CalculateAtsRequest>, JsonRejection>,
) -> Result<Json<CalculateAtsResponse>, AppError> {
    let Json(request) = payload?;
    let score = state
        .analyzer
        .score_only(&request.job_description, &request.resume_text)?;

    Ok(Json(CalculateAtsResponse {
        success: true,
        ats: score.into(),
    }))
}

/// POST /analyze-resume
///
/// Multipart form with `job_description` (text) and `resume_file` (PDF).
/// Extraction and classification are CPU-bound and run on the blocking pool.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalyzeResumeResponse>, AppError> {
    let mut multipart = multipart?;
    let mut job_description = String::new();
    let mut document: Option<Bytes> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("job_description") => job_description = field.text().await?,
            Some("resume_file") => {
                let has_file_name = field.file_name().is_some_and(|n| !n.is_empty());
                let bytes = field.bytes().await?;
                if has_file_name {
                    document = Some(bytes);
                }
            }
            _ => {}
        }
    }

    let document = document.ok_or(AnalysisError::MissingInput("resume_file"))?;

    let analyzer = state.analyzer.clone();
    let result =
        tokio::task::spawn_blocking(move || analyzer.analyze_full(&job_description, &document))
            .await
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!("spawn_blocking failed in analysis: {e}"))
            })??;

    Ok(Json(AnalyzeResumeResponse {
        success: true,
        predicted_category: result.classification.category,
        confidence: result.classification.confidence,
        ats: result.score.into(),
        resume_text_length: result.resume_text_length,
        cleaned_text_length: result.cleaned_text_length,
    }))
}
