use super::state::AppState;
use crate::model::{ReorganizedSegment, SummaryType};
use crate::pipeline::SourceUtterance;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use tracing::error;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ReorganizeRequest {
    pub utterances: Vec<SourceUtterance>,

    /// Language for the reorganized sentences (default: source language)
    #[serde(rename = "targetLanguage")]
    pub target_language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReorganizeResponse {
    pub success: bool,
    pub data: Vec<ReorganizedSegment>,
    #[serde(rename = "processedCount")]
    pub processed_count: usize,
}

#[derive(Debug, Deserialize)]
pub struct TranslateBatchRequest {
    pub texts: Vec<String>,
    #[serde(rename = "sourceLang")]
    pub source_lang: Option<String>,
    #[serde(rename = "targetLang")]
    pub target_lang: String,
}

#[derive(Debug, Serialize)]
pub struct TranslateBatchResponse {
    #[serde(rename = "translatedTexts")]
    pub translated_texts: Vec<String>,
    pub stats: TranslateStats,
}

#[derive(Debug, Serialize)]
pub struct TranslateStats {
    pub total: usize,
    #[serde(rename = "elapsedMs")]
    pub elapsed_ms: u128,
    #[serde(rename = "avgMs")]
    pub avg_ms: u128,
}

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    #[serde(rename = "transcriptIds")]
    pub transcript_ids: Vec<String>,
    #[serde(rename = "summaryType")]
    pub summary_type: SummaryType,
    #[serde(rename = "customPrompt")]
    pub custom_prompt: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub success: bool,
    pub summary: String,
    #[serde(rename = "summaryType")]
    pub summary_type: SummaryType,
    pub language: String,
}

#[derive(Debug, Deserialize)]
pub struct QaRequest {
    #[serde(rename = "transcriptIds")]
    pub transcript_ids: Vec<String>,
    pub question: String,
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QaResponse {
    pub success: bool,
    pub question: String,
    pub answer: String,
    pub language: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct FailureResponse {
    pub success: bool,
    pub error: String,
}

fn bad_request(message: impl Into<String>) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/reorganize
/// Reorganize fragmented utterances into complete sentences
pub async fn reorganize(
    State(state): State<AppState>,
    Json(req): Json<ReorganizeRequest>,
) -> impl IntoResponse {
    if req.utterances.is_empty() {
        return bad_request("utterances must not be empty");
    }

    let segments = state
        .reorganizer
        .reorganize(&req.utterances, req.target_language.as_deref())
        .await;

    (
        StatusCode::OK,
        Json(ReorganizeResponse {
            success: true,
            processed_count: req.utterances.len(),
            data: segments,
        }),
    )
        .into_response()
}

/// POST /api/translate/batch
/// Translate a list of texts into the target language
pub async fn translate_batch(
    State(state): State<AppState>,
    Json(req): Json<TranslateBatchRequest>,
) -> impl IntoResponse {
    if req.texts.is_empty() {
        return bad_request("texts must not be empty");
    }
    if req.target_lang.is_empty() {
        return bad_request("targetLang is required");
    }

    let (translated, stats) = state
        .translator
        .translate(&req.texts, req.source_lang.as_deref(), &req.target_lang)
        .await;

    (
        StatusCode::OK,
        Json(TranslateBatchResponse {
            translated_texts: translated,
            stats: TranslateStats {
                total: stats.total,
                elapsed_ms: stats.elapsed_ms,
                avg_ms: stats.avg_ms,
            },
        }),
    )
        .into_response()
}

/// POST /api/summarize
/// Summarize one or more stored transcripts
pub async fn summarize(
    State(state): State<AppState>,
    Json(req): Json<SummarizeRequest>,
) -> impl IntoResponse {
    if req.transcript_ids.is_empty() {
        return bad_request("transcriptIds must not be empty");
    }
    if req.summary_type == SummaryType::Custom
        && req.custom_prompt.as_deref().map_or(true, |p| p.trim().is_empty())
    {
        return bad_request("customPrompt is required for custom summaries");
    }

    let language = req.language.as_deref().unwrap_or("en");

    match state
        .summarizer
        .summarize(
            &req.transcript_ids,
            req.summary_type,
            req.custom_prompt.as_deref(),
            language,
        )
        .await
    {
        Ok(result) => (
            StatusCode::OK,
            Json(SummarizeResponse {
                success: true,
                summary: result.text,
                summary_type: result.summary_type,
                language: result.language,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Summarization failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(FailureResponse {
                    success: false,
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// POST /api/qa
/// Answer a question about one or more stored transcripts
pub async fn qa(State(state): State<AppState>, Json(req): Json<QaRequest>) -> impl IntoResponse {
    if req.transcript_ids.is_empty() {
        return bad_request("transcriptIds must not be empty");
    }
    if req.question.trim().is_empty() {
        return bad_request("question must not be empty");
    }

    let language = req.language.as_deref().unwrap_or("en");

    match state
        .summarizer
        .answer(&req.transcript_ids, &req.question, language)
        .await
    {
        Ok(result) => (
            StatusCode::OK,
            Json(QaResponse {
                success: true,
                question: result.question,
                answer: result.answer,
                language: result.language,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Q&A failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(FailureResponse {
                    success: false,
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
