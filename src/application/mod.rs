//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（ChatCompletion、TtsEngine、Cache）
//! - commands: 命令及处理器（chat / narrate / synthesize）
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;

// Re-exports
pub use commands::{
    // Chat commands
    GenerateTextCommand,
    GenerateTextResponse,
    // Narrate commands
    NarrateCommand,
    NarrateResponse,
    NarrationSettings,
    NarrationSource,
    VoiceSettings,
    // Synthesize commands
    SynthesizeCommand,
    SynthesizeResponse,
    // Handlers
    handlers::{GenerateTextHandler, NarrateHandler, SynthesizeHandler},
};

pub use error::ApplicationError;

pub use ports::{
    // Cache
    generate_cache_key,
    CachePort,
    CacheStats,
    NullCache,
    // Chat completion
    ChatCompletionPort,
    ChatError,
    ChatRequest,
    ChatResponse,
    // TTS engine
    SynthesisRequest,
    SynthesisResponse,
    TtsEnginePort,
    TtsError,
};
