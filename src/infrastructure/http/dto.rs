//! Data Transfer Objects

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::application::NarrationSource;
use crate::domain::{Narration, NarrationSegment};
use crate::infrastructure::http::error::ApiError;

// ============================================================================
// Chat DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub text: String,
    pub model: String,
}

// ============================================================================
// Narrate DTOs
// ============================================================================

/// `message`（先生成旁白）或 `text`（直接朗读）二选一，`text` 优先
#[derive(Debug, Deserialize)]
pub struct NarrateRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

impl NarrateRequest {
    pub fn source(&self) -> Result<NarrationSource, ApiError> {
        let non_blank = |s: &Option<String>| s.as_ref().filter(|v| !v.trim().is_empty()).cloned();

        if let Some(text) = non_blank(&self.text) {
            Ok(NarrationSource::Text(text))
        } else if let Some(message) = non_blank(&self.message) {
            Ok(NarrationSource::Prompt(message))
        } else {
            Err(ApiError::BadRequest(
                "Either 'message' or 'text' is required".to_string(),
            ))
        }
    }
}

/// 旁白分段：audio 为 base64 编码，失败时为 null 并附带 error
#[derive(Debug, Serialize)]
pub struct SegmentDto {
    pub text: String,
    pub audio: Option<String>,
    pub audio_type: String,
    pub error: Option<String>,
}

impl From<NarrationSegment> for SegmentDto {
    fn from(segment: NarrationSegment) -> Self {
        Self {
            text: segment.text,
            audio: segment.audio.map(|bytes| BASE64.encode(bytes)),
            audio_type: segment.audio_type,
            error: segment.error,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NarrateResponse {
    pub text: String,
    pub segments: Vec<SegmentDto>,
    pub cached: bool,
}

impl NarrateResponse {
    pub fn new(narration: Narration, cached: bool) -> Self {
        Self {
            text: narration.text,
            segments: narration.segments.into_iter().map(SegmentDto::from).collect(),
            cached,
        }
    }
}

// ============================================================================
// TTS DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct TtsQuery {
    pub text: String,
    #[serde(default)]
    pub voice: Option<String>,
    #[serde(default)]
    pub speed: Option<f32>,
}
