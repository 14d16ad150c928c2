//! Chat Command Handlers

use std::sync::Arc;

use crate::application::commands::chat_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::{generate_cache_key, CachePort, ChatCompletionPort, ChatRequest};

/// GenerateText Handler - 调用 LLM 生成旁白文本（带 TTL 缓存）
pub struct GenerateTextHandler {
    chat_client: Arc<dyn ChatCompletionPort>,
    cache: Arc<dyn CachePort<String>>,
}

impl GenerateTextHandler {
    pub fn new(chat_client: Arc<dyn ChatCompletionPort>, cache: Arc<dyn CachePort<String>>) -> Self {
        Self { chat_client, cache }
    }

    /// 解析模型：请求未指定时使用默认模型
    pub fn resolve_model(&self, model: Option<String>) -> String {
        model
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| self.chat_client.default_model().to_string())
    }

    pub async fn handle(&self, cmd: GenerateTextCommand) -> Result<GenerateTextResponse, ApplicationError> {
        if cmd.message.trim().is_empty() {
            return Err(ApplicationError::validation("message must not be empty"));
        }

        let model = self.resolve_model(cmd.model);
        let cache_key = generate_cache_key("chat", &model, &cmd.message);

        if let Some(text) = self.cache.get(&cache_key) {
            tracing::debug!(model = %model, cache_key = %cache_key, "Chat cache hit");
            return Ok(GenerateTextResponse {
                text,
                model,
                cached: true,
            });
        }

        let response = self
            .chat_client
            .complete(ChatRequest {
                message: cmd.message,
                model: model.clone(),
            })
            .await
            .map_err(|e| {
                tracing::error!(model = %model, error = %e, "Chat completion failed");
                ApplicationError::from(e)
            })?;

        tracing::info!(
            model = %response.model,
            text_len = response.text.len(),
            "Narration text generated"
        );

        self.cache.put(cache_key, response.text.clone());

        Ok(GenerateTextResponse {
            text: response.text,
            model: response.model,
            cached: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::NullCache;
    use crate::infrastructure::adapters::FakeChatClient;
    use crate::infrastructure::memory::InMemoryTtlCache;
    use std::time::Duration;

    fn handler_with(chat: Arc<FakeChatClient>) -> GenerateTextHandler {
        let cache: Arc<dyn CachePort<String>> =
            Arc::new(InMemoryTtlCache::new(16, Duration::from_secs(60)));
        GenerateTextHandler::new(chat, cache)
    }

    #[tokio::test]
    async fn test_generates_text_with_default_model() {
        let chat = Arc::new(FakeChatClient::new("The hour is late."));
        let handler = handler_with(chat.clone());

        let result = handler
            .handle(GenerateTextCommand {
                message: "tell me".into(),
                model: None,
            })
            .await
            .unwrap();

        assert_eq!(result.text, "The hour is late.");
        assert_eq!(result.model, chat.default_model());
        assert!(!result.cached);
    }

    #[tokio::test]
    async fn test_second_identical_prompt_served_from_cache() {
        let chat = Arc::new(FakeChatClient::new("Again."));
        let handler = handler_with(chat.clone());
        let cmd = GenerateTextCommand {
            message: "repeat".into(),
            model: Some("m".into()),
        };

        handler.handle(cmd.clone()).await.unwrap();
        let second = handler.handle(cmd).await.unwrap();

        assert!(second.cached);
        assert_eq!(chat.call_count(), 1);
    }

    #[tokio::test]
    async fn test_null_cache_always_calls_upstream() {
        let chat = Arc::new(FakeChatClient::new("Fresh."));
        let handler = GenerateTextHandler::new(chat.clone(), Arc::new(NullCache));
        let cmd = GenerateTextCommand {
            message: "again".into(),
            model: None,
        };

        handler.handle(cmd.clone()).await.unwrap();
        handler.handle(cmd).await.unwrap();
        assert_eq!(chat.call_count(), 2);
    }

    #[tokio::test]
    async fn test_empty_message_rejected() {
        let handler = handler_with(Arc::new(FakeChatClient::new("x")));
        let err = handler
            .handle(GenerateTextCommand {
                message: "   ".into(),
                model: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_upstream_failure_is_external_error() {
        let handler = handler_with(Arc::new(FakeChatClient::failing()));
        let err = handler
            .handle(GenerateTextCommand {
                message: "hello".into(),
                model: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::ExternalServiceError(_)));
    }
}
