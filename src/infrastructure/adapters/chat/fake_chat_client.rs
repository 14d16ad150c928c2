//! Fake Chat Client - 本地运行/测试用的对话客户端
//!
//! 始终返回固定的旁白文本，不实际调用 LLM 服务

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::application::ports::{ChatCompletionPort, ChatError, ChatRequest, ChatResponse};

/// 默认返回的旁白
pub const FAKE_NARRATION: &str = "The night was silent. Then, a single bell rang out across the valley! \
Who would answer its call?";

/// Fake Chat Client
pub struct FakeChatClient {
    /// 为 None 时每次调用都返回服务错误
    response: Option<String>,
    calls: AtomicUsize,
}

impl FakeChatClient {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: Some(response.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// 始终失败的客户端
    pub fn failing() -> Self {
        Self {
            response: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// 已处理的调用次数
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for FakeChatClient {
    fn default() -> Self {
        Self::new(FAKE_NARRATION)
    }
}

#[async_trait]
impl ChatCompletionPort for FakeChatClient {
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, ChatError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(
            model = %request.model,
            message_len = request.message.len(),
            "FakeChatClient: returning fixed narration"
        );

        match &self.response {
            Some(text) => Ok(ChatResponse {
                text: text.clone(),
                model: request.model,
            }),
            None => Err(ChatError::ServiceError {
                status: 503,
                body: "fake chat failure".to_string(),
            }),
        }
    }

    fn default_model(&self) -> &str {
        "fake/narrator"
    }
}
