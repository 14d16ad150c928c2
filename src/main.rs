//! Narrator - 故事旁白生成与语音合成服务
//!
//! 启动流程：加载配置 -> 初始化日志 -> 创建客户端与缓存 -> 启动 HTTP 服务

use std::sync::Arc;
use std::time::Duration;

use narrator::application::{CachePort, ChatCompletionPort, NullCache, TtsEnginePort};
use narrator::config::{load_config, print_config, AppConfig, Provider};
use narrator::domain::Narration;
use narrator::infrastructure::adapters::{
    FakeChatClient, FakeTtsClient, HttpTtsClient, OpenRouterClient,
};
use narrator::infrastructure::http::{AppState, HttpServer, ServerConfig};
use narrator::infrastructure::memory::InMemoryTtlCache;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("Narrator v{}", env!("CARGO_PKG_VERSION"));
    print_config(&config);

    // 创建对话补全客户端
    let chat_client: Arc<dyn ChatCompletionPort> = match config.chat.provider {
        Provider::Http => Arc::new(OpenRouterClient::new(config.chat.client_config())?),
        Provider::Fake => Arc::new(FakeChatClient::default()),
    };

    // 创建 TTS 引擎
    let tts_engine: Arc<dyn TtsEnginePort> = match config.tts.provider {
        Provider::Http => Arc::new(HttpTtsClient::new(config.tts.client_config())?),
        Provider::Fake => Arc::new(FakeTtsClient::with_defaults()?),
    };

    if !tts_engine.health_check().await {
        tracing::warn!("TTS API key not configured, narration segments will have no audio");
    }

    // 创建缓存
    let (chat_cache, narration_cache) = build_caches(&config);

    let settings = config.narration.settings(config.tts.voice_settings());
    let state = AppState::new(chat_client, tts_engine, chat_cache, narration_cache, settings);

    let mut server_config = ServerConfig::new(&config.server.host, config.server.port);
    if config.server.static_files.enabled {
        server_config = server_config.with_static_dir(&config.server.static_files.dir);
    }

    let server = HttpServer::new(server_config, state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},narrator={},tower_http=debug",
        config.log.level, config.log.level
    );
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
}

fn build_caches(
    config: &AppConfig,
) -> (Arc<dyn CachePort<String>>, Arc<dyn CachePort<Narration>>) {
    if !config.cache.enabled {
        tracing::info!("Cache disabled");
        return (Arc::new(NullCache), Arc::new(NullCache));
    }

    let ttl = Duration::from_secs(config.cache.ttl_secs);
    (
        Arc::new(InMemoryTtlCache::new(config.cache.capacity, ttl)),
        Arc::new(InMemoryTtlCache::new(config.cache.capacity, ttl)),
    )
}
