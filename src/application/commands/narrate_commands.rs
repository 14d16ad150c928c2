//! Narrate Commands - 旁白合成命令（文本 + 分段音频）

use crate::domain::{Narration, SegmentConfig};

/// 旁白来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NarrationSource {
    /// 先交给 LLM 生成旁白
    Prompt(String),
    /// 直接朗读给定文本
    Text(String),
}

/// 旁白合成命令
#[derive(Debug, Clone)]
pub struct NarrateCommand {
    pub source: NarrationSource,
    pub model: Option<String>,
}

/// 旁白合成响应
#[derive(Debug, Clone)]
pub struct NarrateResponse {
    pub narration: Narration,
    pub cached: bool,
}

/// 音色参数
#[derive(Debug, Clone)]
pub struct VoiceSettings {
    pub voice: String,
    pub speed: f32,
    pub lang: String,
    /// 后端未返回 Content-Type 时使用的 MIME 类型
    pub audio_type: String,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            voice: "af_bella".to_string(),
            speed: 1.0,
            lang: "en-us".to_string(),
            audio_type: "audio/wav".to_string(),
        }
    }
}

/// 旁白合成参数
#[derive(Debug, Clone, Default)]
pub struct NarrationSettings {
    pub segment: SegmentConfig,
    pub voice: VoiceSettings,
    /// 单次请求内最大并发合成数，0 表示不限制
    pub max_concurrent_synthesis: usize,
}
