//! Narrate Handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

use crate::application::NarrateCommand;
use crate::infrastructure::http::dto::{NarrateRequest, NarrateResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// POST /api/narrate - 生成旁白并逐段合成语音
///
/// 单段合成失败不影响整体响应，失败分段的 audio 为 null
pub async fn narrate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NarrateRequest>, JsonRejection>,
) -> Result<Json<NarrateResponse>, ApiError> {
    let Json(req) = payload?;
    let cmd = NarrateCommand {
        source: req.source()?,
        model: req.model,
    };

    let result = state.narrate_handler.handle(cmd).await?;

    Ok(Json(NarrateResponse::new(result.narration, result.cached)))
}
