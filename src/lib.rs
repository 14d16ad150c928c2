//! Narrator - 故事旁白生成与语音合成服务
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - 文本分批（按句切分，贪心合并）
//! - Narration / NarrationSegment
//!
//! 应用层 (application/):
//! - Ports: ChatCompletion, TtsEngine, Cache
//! - Commands: 旁白生成、分段并发合成、单次合成
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API + 前端页面
//! - Adapters: OpenRouter Client, TTS Client（含 Fake 实现）
//! - Memory: TTL 缓存

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
