//! Application State
//!
//! 请求处理上下文：显式构造并注入的客户端与命令处理器

use std::sync::Arc;

use crate::application::{
    // Command handlers
    GenerateTextHandler, NarrateHandler, SynthesizeHandler,
    // Ports
    CachePort, ChatCompletionPort, TtsEnginePort,
    // Settings
    NarrationSettings,
};
use crate::domain::Narration;

/// 应用状态
///
/// 客户端在启动时创建，随 AppState 一起在服务关闭时释放
pub struct AppState {
    // ========== Ports ==========
    pub chat_client: Arc<dyn ChatCompletionPort>,
    pub tts_engine: Arc<dyn TtsEnginePort>,
    pub chat_cache: Arc<dyn CachePort<String>>,
    pub narration_cache: Arc<dyn CachePort<Narration>>,

    // ========== Command Handlers ==========
    pub generate_text_handler: Arc<GenerateTextHandler>,
    pub narrate_handler: NarrateHandler,
    pub synthesize_handler: SynthesizeHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        chat_client: Arc<dyn ChatCompletionPort>,
        tts_engine: Arc<dyn TtsEnginePort>,
        chat_cache: Arc<dyn CachePort<String>>,
        narration_cache: Arc<dyn CachePort<Narration>>,
        settings: NarrationSettings,
    ) -> Self {
        let generate_text_handler = Arc::new(GenerateTextHandler::new(
            chat_client.clone(),
            chat_cache.clone(),
        ));

        Self {
            // Ports
            chat_client: chat_client.clone(),
            tts_engine: tts_engine.clone(),
            chat_cache: chat_cache.clone(),
            narration_cache: narration_cache.clone(),

            // Command handlers
            narrate_handler: NarrateHandler::new(
                generate_text_handler.clone(),
                tts_engine.clone(),
                narration_cache.clone(),
                settings.clone(),
            ),
            synthesize_handler: SynthesizeHandler::new(tts_engine.clone(), settings.voice),
            generate_text_handler,
        }
    }
}
