//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping      GET   健康检查
//! - /api/chat      POST  生成旁白文本
//! - /api/narrate   POST  生成旁白 + 分段音频
//! - /api/tts       POST  文本直接合成音频
//!
//! 根页面与 /static 由 server 按配置挂载

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/chat", post(handlers::chat))
        .route("/narrate", post(handlers::narrate))
        .route("/tts", post(handlers::text_to_speech))
}
