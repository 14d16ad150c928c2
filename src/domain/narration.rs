//! Narration - 旁白与分段
//!
//! 一次旁白请求的结果：完整文本 + 有序的文本/音频分段

/// 文本片段（按句子边界分批得到）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSegment {
    /// 在旁白中的顺序
    pub index: usize,
    pub text: String,
}

impl TextSegment {
    /// 由分批结果构建有序片段
    pub fn from_batches(batches: Vec<String>) -> Vec<Self> {
        batches
            .into_iter()
            .enumerate()
            .map(|(index, text)| Self { index, text })
            .collect()
    }
}

/// 旁白分段：文本片段 1:1 对应的合成结果
///
/// `audio` 与 `error` 有且只有一个为 Some
#[derive(Debug, Clone, PartialEq)]
pub struct NarrationSegment {
    pub index: usize,
    pub text: String,
    pub audio: Option<Vec<u8>>,
    /// 音频 MIME 类型（如 audio/wav）
    pub audio_type: String,
    pub error: Option<String>,
}

impl NarrationSegment {
    /// 合成成功
    pub fn synthesized(segment: TextSegment, audio: Vec<u8>, audio_type: impl Into<String>) -> Self {
        Self {
            index: segment.index,
            text: segment.text,
            audio: Some(audio),
            audio_type: audio_type.into(),
            error: None,
        }
    }

    /// 合成失败
    pub fn failed(segment: TextSegment, audio_type: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            index: segment.index,
            text: segment.text,
            audio: None,
            audio_type: audio_type.into(),
            error: Some(error.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// 完整旁白
#[derive(Debug, Clone, PartialEq)]
pub struct Narration {
    /// 旁白全文（未分批）
    pub text: String,
    /// 按原文顺序排列的分段
    pub segments: Vec<NarrationSegment>,
}

impl Narration {
    /// 是否所有分段都合成成功
    pub fn is_complete(&self) -> bool {
        self.segments.iter().all(NarrationSegment::is_ok)
    }

    pub fn failed_count(&self) -> usize {
        self.segments.iter().filter(|s| !s.is_ok()).count()
    }
}
