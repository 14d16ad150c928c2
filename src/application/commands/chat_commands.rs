//! Chat Commands - 旁白文本生成命令

/// 生成旁白文本命令
#[derive(Debug, Clone)]
pub struct GenerateTextCommand {
    pub message: String,
    /// 为 None 时使用默认模型
    pub model: Option<String>,
}

/// 生成旁白文本响应
#[derive(Debug, Clone)]
pub struct GenerateTextResponse {
    pub text: String,
    pub model: String,
    /// 是否命中缓存
    pub cached: bool,
}
