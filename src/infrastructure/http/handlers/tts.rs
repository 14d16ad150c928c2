//! TTS Handlers

use axum::{
    body::Body,
    extract::{rejection::QueryRejection, Query, State},
    http::{header, StatusCode},
    response::Response,
};
use std::sync::Arc;

use crate::application::SynthesizeCommand;
use crate::infrastructure::http::dto::TtsQuery;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// POST /api/tts?text=... - 直接返回音频文件
pub async fn text_to_speech(
    State(state): State<Arc<AppState>>,
    query: Result<Query<TtsQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    let result = state
        .synthesize_handler
        .handle(SynthesizeCommand {
            text: query.text,
            voice: query.voice,
            speed: query.speed,
        })
        .await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, result.content_type)
        .header(header::CONTENT_LENGTH, result.audio_data.len())
        .header(
            header::CONTENT_DISPOSITION,
            "attachment; filename=narration.wav",
        )
        .body(Body::from(result.audio_data))
        .map_err(|e| ApiError::Internal(e.to_string()))
}
