//! Chat Handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

use crate::application::GenerateTextCommand;
use crate::infrastructure::http::dto::{ChatRequest, ChatResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// POST /api/chat - 生成旁白文本
pub async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(req) = payload?;
    let result = state
        .generate_text_handler
        .handle(GenerateTextCommand {
            message: req.message,
            model: req.model,
        })
        .await?;

    Ok(Json(ChatResponse {
        text: result.text,
        model: result.model,
    }))
}
