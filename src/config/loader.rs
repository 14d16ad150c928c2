//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 约定环境变量（OPENROUTER_API_KEY / HF_API_KEY / KOKORO_TTS_URL）
//! 2. 环境变量（前缀 `NARRATOR_`）
//! 3. 配置文件（config.toml）
//! 4. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{AppConfig, Provider};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 约定环境变量 -> 配置项
const CONVENTIONAL_ENV_VARS: &[(&str, &str)] = &[
    ("OPENROUTER_API_KEY", "chat.api_key"),
    ("HF_API_KEY", "tts.api_key"),
    ("KOKORO_TTS_URL", "tts.url"),
];

/// 加载应用配置
///
/// # 环境变量示例
/// - `NARRATOR_SERVER__PORT=8080`
/// - `NARRATOR_TTS__VOICE=af_sky`
/// - `NARRATOR_NARRATION__MAX_BATCH_CHARS=300`
/// - `OPENROUTER_API_KEY=sk-...`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8000)?
        .set_default("chat.base_url", "https://openrouter.ai/api/v1")?
        .set_default("chat.default_model", "xiaomi/mimo-v2-flash")?
        .set_default("chat.max_tokens", 500)?
        .set_default("chat.timeout_secs", 60)?
        .set_default(
            "tts.url",
            "https://api-inference.huggingface.co/models/hexgrad/Kokoro-82M",
        )?
        .set_default("tts.voice", "af_bella")?
        .set_default("tts.speed", 1.0)?
        .set_default("tts.lang", "en-us")?
        .set_default("tts.timeout_secs", 120)?
        .set_default("narration.max_batch_chars", 200)?
        .set_default("narration.max_concurrent_synthesis", 0)?
        .set_default("cache.enabled", true)?
        .set_default("cache.ttl_secs", 3600)?
        .set_default("cache.capacity", 256)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量
    // 前缀: NARRATOR_，层级分隔符: __ (双下划线)
    builder = builder.add_source(
        Environment::with_prefix("NARRATOR")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 4. 约定环境变量（最高优先级）
    for (var, key) in CONVENTIONAL_ENV_VARS {
        let value = std::env::var(var).ok().filter(|v| !v.is_empty());
        builder = builder.set_override_option(*key, value)?;
    }

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.chat.provider == Provider::Http && config.chat.base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Chat base URL cannot be empty".to_string(),
        ));
    }

    if config.tts.provider == Provider::Http && config.tts.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "TTS URL cannot be empty".to_string(),
        ));
    }

    if config.tts.speed <= 0.0 {
        return Err(ConfigError::ValidationError(
            "TTS speed must be positive".to_string(),
        ));
    }

    if config.narration.max_batch_chars == 0 {
        return Err(ConfigError::ValidationError(
            "Max batch chars cannot be 0".to_string(),
        ));
    }

    if config.cache.enabled && (config.cache.capacity == 0 || config.cache.ttl_secs == 0) {
        return Err(ConfigError::ValidationError(
            "Cache capacity and TTL must be positive when cache is enabled".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志），API Key 只显示是否已配置
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    if config.server.static_files.enabled {
        tracing::info!("Static Files: {:?}", config.server.static_files.dir);
    }
    tracing::info!("Chat Provider: {:?}", config.chat.provider);
    tracing::info!("Chat URL: {}", config.chat.base_url);
    tracing::info!("Chat Default Model: {}", config.chat.default_model);
    tracing::info!("Chat API Key: {}", mask(&config.chat.api_key));
    tracing::info!("TTS Provider: {:?}", config.tts.provider);
    tracing::info!("TTS URL: {}", config.tts.url);
    tracing::info!("TTS API Key: {}", mask(&config.tts.api_key));
    tracing::info!(
        "TTS Voice: {} (speed {}, lang {})",
        config.tts.voice,
        config.tts.speed,
        config.tts.lang
    );
    tracing::info!("Max Batch Chars: {}", config.narration.max_batch_chars);
    tracing::info!("Cache Enabled: {}", config.cache.enabled);
    if config.cache.enabled {
        tracing::info!("Cache TTL: {}s", config.cache.ttl_secs);
        tracing::info!("Cache Capacity: {}", config.cache.capacity);
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

fn mask(key: &Option<String>) -> &'static str {
    match key {
        Some(k) if !k.is_empty() => "configured",
        _ => "not configured",
    }
}
