//! 应用层错误定义
//!
//! 统一的命令错误类型

use thiserror::Error;

use crate::application::ports::{ChatError, TtsError};

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 外部服务错误（含未配置）
    #[error("External service error: {0}")]
    ExternalServiceError(String),
}

impl ApplicationError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }
}

impl From<ChatError> for ApplicationError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::NotConfigured(_) => Self::ExternalServiceError(err.to_string()),
            _ => Self::ExternalServiceError(format!("OpenRouter API error: {}", err)),
        }
    }
}

impl From<TtsError> for ApplicationError {
    fn from(err: TtsError) -> Self {
        match err {
            TtsError::NotConfigured => Self::ExternalServiceError(err.to_string()),
            _ => Self::ExternalServiceError(format!("TTS API error: {}", err)),
        }
    }
}
