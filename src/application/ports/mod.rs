//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod chat_completion;
mod narration_cache;
mod tts_engine;

pub use chat_completion::{ChatCompletionPort, ChatError, ChatRequest, ChatResponse};
pub use narration_cache::{generate_cache_key, CachePort, CacheStats, NullCache};
pub use tts_engine::{SynthesisRequest, SynthesisResponse, TtsEnginePort, TtsError};
