//! Synthesize Command Handlers

use std::sync::Arc;

use crate::application::commands::narrate_commands::VoiceSettings;
use crate::application::commands::synthesize_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::{SynthesisRequest, TtsEnginePort};

/// Synthesize Handler - 整段文本直接合成为一个音频文件
pub struct SynthesizeHandler {
    tts_engine: Arc<dyn TtsEnginePort>,
    voice: VoiceSettings,
}

impl SynthesizeHandler {
    pub fn new(tts_engine: Arc<dyn TtsEnginePort>, voice: VoiceSettings) -> Self {
        Self { tts_engine, voice }
    }

    pub async fn handle(&self, cmd: SynthesizeCommand) -> Result<SynthesizeResponse, ApplicationError> {
        if cmd.text.trim().is_empty() {
            return Err(ApplicationError::validation("text must not be empty"));
        }

        let request = SynthesisRequest {
            text: cmd.text,
            voice: cmd.voice.unwrap_or_else(|| self.voice.voice.clone()),
            speed: cmd.speed.unwrap_or(self.voice.speed),
            lang: self.voice.lang.clone(),
        };

        if request.speed <= 0.0 {
            return Err(ApplicationError::validation("speed must be positive"));
        }

        let response = self.tts_engine.synthesize(request).await.map_err(|e| {
            tracing::error!(error = %e, "TTS synthesis failed");
            ApplicationError::from(e)
        })?;

        Ok(SynthesizeResponse {
            audio_data: response.audio_data,
            content_type: response.content_type,
        })
    }
}
