//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::application::{NarrationSettings, VoiceSettings};
use crate::domain::{SegmentConfig, DEFAULT_MAX_CHARS};
use crate::infrastructure::adapters::{
    HttpTtsClientConfig, OpenRouterClientConfig, DEFAULT_SYSTEM_PROMPT,
};

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 对话补全（旁白生成）配置
    #[serde(default)]
    pub chat: ChatConfig,

    /// TTS 引擎配置
    #[serde(default)]
    pub tts: TtsConfig,

    /// 旁白分批与并发配置
    #[serde(default)]
    pub narration: NarrationConfig,

    /// 缓存配置
    #[serde(default)]
    pub cache: CacheConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 静态文件服务配置
    #[serde(default)]
    pub static_files: StaticFilesConfig,
}

/// 静态文件服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct StaticFilesConfig {
    /// 是否启用静态文件服务
    #[serde(default = "default_static_enabled")]
    pub enabled: bool,

    /// 静态文件目录（根页面为其中的 index.html）
    #[serde(default = "default_static_dir")]
    pub dir: PathBuf,
}

fn default_static_enabled() -> bool {
    true
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("frontend")
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            enabled: default_static_enabled(),
            dir: default_static_dir(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_files: StaticFilesConfig::default(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 后端类型
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// 调用外部 HTTP 服务
    #[default]
    Http,
    /// 本地假实现（无需 API Key）
    Fake,
}

/// 对话补全配置
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    #[serde(default)]
    pub provider: Provider,

    /// API 基础 URL
    #[serde(default = "default_chat_base_url")]
    pub base_url: String,

    /// API Key（也可通过 OPENROUTER_API_KEY 设置）
    #[serde(default)]
    pub api_key: Option<String>,

    /// 请求未指定模型时使用的模型
    #[serde(default = "default_chat_model")]
    pub default_model: String,

    /// 旁白系统提示
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// 最大生成 token 数
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// 请求超时时间（秒）
    #[serde(default = "default_chat_timeout")]
    pub timeout_secs: u64,
}

fn default_chat_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_chat_model() -> String {
    "xiaomi/mimo-v2-flash".to_string()
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

fn default_max_tokens() -> u32 {
    500
}

fn default_chat_timeout() -> u64 {
    60
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            base_url: default_chat_base_url(),
            api_key: None,
            default_model: default_chat_model(),
            system_prompt: default_system_prompt(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_chat_timeout(),
        }
    }
}

impl ChatConfig {
    pub fn client_config(&self) -> OpenRouterClientConfig {
        OpenRouterClientConfig {
            api_key: self.api_key.clone(),
            default_model: self.default_model.clone(),
            system_prompt: self.system_prompt.clone(),
            max_tokens: self.max_tokens,
            timeout_secs: self.timeout_secs,
            ..OpenRouterClientConfig::new(&self.base_url)
        }
    }
}

/// TTS 引擎配置
#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    #[serde(default)]
    pub provider: Provider,

    /// TTS 推理 URL（也可通过 KOKORO_TTS_URL 设置）
    #[serde(default = "default_tts_url")]
    pub url: String,

    /// API Key（也可通过 HF_API_KEY 设置）
    #[serde(default)]
    pub api_key: Option<String>,

    /// 音色
    #[serde(default = "default_voice")]
    pub voice: String,

    /// 语速
    #[serde(default = "default_speed")]
    pub speed: f32,

    /// 语言
    #[serde(default = "default_lang")]
    pub lang: String,

    /// 默认音频 MIME 类型
    #[serde(default = "default_audio_type")]
    pub audio_type: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_tts_timeout")]
    pub timeout_secs: u64,
}

fn default_tts_url() -> String {
    "https://api-inference.huggingface.co/models/hexgrad/Kokoro-82M".to_string()
}

fn default_voice() -> String {
    "af_bella".to_string()
}

fn default_speed() -> f32 {
    1.0
}

fn default_lang() -> String {
    "en-us".to_string()
}

fn default_audio_type() -> String {
    "audio/wav".to_string()
}

fn default_tts_timeout() -> u64 {
    120
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            url: default_tts_url(),
            api_key: None,
            voice: default_voice(),
            speed: default_speed(),
            lang: default_lang(),
            audio_type: default_audio_type(),
            timeout_secs: default_tts_timeout(),
        }
    }
}

impl TtsConfig {
    pub fn client_config(&self) -> HttpTtsClientConfig {
        HttpTtsClientConfig {
            api_key: self.api_key.clone(),
            audio_type: self.audio_type.clone(),
            timeout_secs: self.timeout_secs,
            ..HttpTtsClientConfig::new(&self.url)
        }
    }

    pub fn voice_settings(&self) -> VoiceSettings {
        VoiceSettings {
            voice: self.voice.clone(),
            speed: self.speed,
            lang: self.lang.clone(),
            audio_type: self.audio_type.clone(),
        }
    }
}

/// 旁白配置
#[derive(Debug, Clone, Deserialize)]
pub struct NarrationConfig {
    /// 每批最大字符数
    #[serde(default = "default_max_batch_chars")]
    pub max_batch_chars: usize,

    /// 单次请求最大并发合成数，0 表示不限制
    #[serde(default)]
    pub max_concurrent_synthesis: usize,
}

fn default_max_batch_chars() -> usize {
    DEFAULT_MAX_CHARS
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            max_batch_chars: default_max_batch_chars(),
            max_concurrent_synthesis: 0,
        }
    }
}

impl NarrationConfig {
    pub fn settings(&self, voice: VoiceSettings) -> NarrationSettings {
        NarrationSettings {
            segment: SegmentConfig::new(self.max_batch_chars),
            voice,
            max_concurrent_synthesis: self.max_concurrent_synthesis,
        }
    }
}

/// 缓存配置
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// 是否启用缓存
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,

    /// 条目存活时间（秒）
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,

    /// 每个缓存的最大条目数
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,
}

fn default_cache_enabled() -> bool {
    true
}

fn default_cache_ttl() -> u64 {
    3600 // 1 小时
}

fn default_cache_capacity() -> usize {
    256
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            ttl_secs: default_cache_ttl(),
            capacity: default_cache_capacity(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
