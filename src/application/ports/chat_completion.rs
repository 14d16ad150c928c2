//! Chat Completion Port - 对话补全抽象
//!
//! 定义旁白文本生成的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

/// 对话补全错误
#[derive(Debug, Error)]
pub enum ChatError {
    /// 未配置 API Key（调用时报告，而非启动时）
    #[error("{0} API key not configured")]
    NotConfigured(&'static str),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: HTTP {status}: {body}")]
    ServiceError { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 对话补全请求
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// 用户输入的提示
    pub message: String,
    /// 模型 ID
    pub model: String,
}

/// 对话补全响应
#[derive(Debug, Clone)]
pub struct ChatResponse {
    /// 生成的旁白文本
    pub text: String,
    /// 实际使用的模型
    pub model: String,
}

/// Chat Completion Port
///
/// 外部 LLM 服务的抽象接口
#[async_trait]
pub trait ChatCompletionPort: Send + Sync {
    /// 根据提示生成旁白文本
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, ChatError>;

    /// 默认模型
    fn default_model(&self) -> &str;
}
