//! OpenRouter Client - 调用 OpenAI 兼容的对话补全接口
//!
//! 实现 ChatCompletionPort trait
//!
//! 外部 API:
//! POST {base_url}/chat/completions
//! Request: {"model": "...", "messages": [...], "max_tokens": 500}  (JSON, Bearer 鉴权)
//! Response: {"choices": [{"message": {"content": "..."}}]}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{ChatCompletionPort, ChatError, ChatRequest, ChatResponse};

/// 默认旁白系统提示
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a narrator. Respond in short, dramatic subtitle-style sentences. \
Keep responses concise and impactful, suitable for text-to-speech narration.";

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// 对话补全请求体
#[derive(Debug, Serialize)]
struct CompletionHttpRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionHttpResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenRouter 客户端配置
#[derive(Debug, Clone)]
pub struct OpenRouterClientConfig {
    /// API 基础 URL
    pub base_url: String,
    /// API Key，未配置时在调用时报错
    pub api_key: Option<String>,
    /// 默认模型
    pub default_model: String,
    /// 系统提示
    pub system_prompt: String,
    /// 最大生成 token 数
    pub max_tokens: u32,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for OpenRouterClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://openrouter.ai/api/v1".to_string(),
            api_key: None,
            default_model: "xiaomi/mimo-v2-flash".to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_tokens: 500,
            timeout_secs: 60,
        }
    }
}

impl OpenRouterClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// OpenRouter 对话补全客户端
pub struct OpenRouterClient {
    client: Client,
    config: OpenRouterClientConfig,
}

impl OpenRouterClient {
    /// 创建新的客户端（共享连接池）
    pub fn new(config: OpenRouterClientConfig) -> Result<Self, ChatError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ChatError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn api_key(&self) -> Result<&str, ChatError> {
        self.config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(ChatError::NotConfigured("OpenRouter"))
    }
}

#[async_trait]
impl ChatCompletionPort for OpenRouterClient {
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, ChatError> {
        let api_key = self.api_key()?;

        let body = CompletionHttpRequest {
            model: &request.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &self.config.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &request.message,
                },
            ],
            max_tokens: self.config.max_tokens,
        };

        tracing::debug!(
            url = %self.completions_url(),
            model = %request.model,
            message_len = request.message.len(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ChatError::Timeout
                } else if e.is_connect() {
                    ChatError::NetworkError(format!("Cannot connect to chat service: {}", e))
                } else {
                    ChatError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::ServiceError {
                status: status.as_u16(),
                body,
            });
        }

        let completion: CompletionHttpResponse = response
            .json()
            .await
            .map_err(|e| ChatError::InvalidResponse(e.to_string()))?;

        let text = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ChatError::InvalidResponse("No completion choices returned".to_string()))?;

        Ok(ChatResponse {
            text,
            model: completion.model.unwrap_or(request.model),
        })
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }
}
