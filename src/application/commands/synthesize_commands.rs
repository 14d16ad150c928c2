//! Synthesize Commands - 单段文本直接合成

/// 合成命令
#[derive(Debug, Clone)]
pub struct SynthesizeCommand {
    pub text: String,
    /// 覆盖默认音色
    pub voice: Option<String>,
    /// 覆盖默认语速
    pub speed: Option<f32>,
}

/// 合成响应
#[derive(Debug, Clone)]
pub struct SynthesizeResponse {
    pub audio_data: Vec<u8>,
    pub content_type: String,
}
