//! Ping Handler
//!
//! 健康检查

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::infrastructure::http::state::AppState;

/// Ping 响应
#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// 请求未指定模型时使用的模型
    pub chat_model: String,
    /// TTS 后端是否可用（已配置）
    pub tts_available: bool,
    pub chat_cache_entries: usize,
    pub narration_cache_entries: usize,
}

/// Ping endpoint - 健康检查
pub async fn ping(State(state): State<Arc<AppState>>) -> Json<PingResponse> {
    Json(PingResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        chat_model: state.chat_client.default_model().to_string(),
        tts_available: state.tts_engine.health_check().await,
        chat_cache_entries: state.chat_cache.stats().entries,
        narration_cache_entries: state.narration_cache.stats().entries,
    })
}
