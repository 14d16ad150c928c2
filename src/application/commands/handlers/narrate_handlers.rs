//! Narrate Command Handlers

use std::sync::Arc;

use futures_util::future::join_all;
use tokio::sync::Semaphore;
use uuid::Uuid;

use crate::application::commands::chat_commands::GenerateTextCommand;
use crate::application::commands::handlers::GenerateTextHandler;
use crate::application::commands::narrate_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::{
    generate_cache_key, CachePort, SynthesisRequest, TtsEnginePort, TtsError,
};
use crate::domain::{split_into_batches, Narration, NarrationSegment, TextSegment};

/// Narrate Handler - 生成旁白文本并按分批并行合成语音
///
/// 每个分段的合成相互独立：单段失败只标记该段，不影响其他分段
pub struct NarrateHandler {
    text_handler: Arc<GenerateTextHandler>,
    tts_engine: Arc<dyn TtsEnginePort>,
    cache: Arc<dyn CachePort<Narration>>,
    settings: NarrationSettings,
}

impl NarrateHandler {
    pub fn new(
        text_handler: Arc<GenerateTextHandler>,
        tts_engine: Arc<dyn TtsEnginePort>,
        cache: Arc<dyn CachePort<Narration>>,
        settings: NarrationSettings,
    ) -> Self {
        Self {
            text_handler,
            tts_engine,
            cache,
            settings,
        }
    }

    pub async fn handle(&self, cmd: NarrateCommand) -> Result<NarrateResponse, ApplicationError> {
        let narration_id = Uuid::new_v4();
        let model = self.text_handler.resolve_model(cmd.model);

        let cache_key = match &cmd.source {
            NarrationSource::Prompt(message) => {
                if message.trim().is_empty() {
                    return Err(ApplicationError::validation("message must not be empty"));
                }
                generate_cache_key("narrate", &model, message)
            }
            NarrationSource::Text(text) => {
                if text.trim().is_empty() {
                    return Err(ApplicationError::validation("text must not be empty"));
                }
                generate_cache_key("narrate-text", "", text)
            }
        };

        if let Some(narration) = self.cache.get(&cache_key) {
            tracing::info!(
                narration_id = %narration_id,
                segments = narration.segments.len(),
                "Narration cache hit"
            );
            return Ok(NarrateResponse {
                narration,
                cached: true,
            });
        }

        let text = match cmd.source {
            NarrationSource::Prompt(message) => {
                self.text_handler
                    .handle(GenerateTextCommand {
                        message,
                        model: Some(model),
                    })
                    .await?
                    .text
            }
            NarrationSource::Text(text) => text,
        };

        let segments = TextSegment::from_batches(split_into_batches(&text, &self.settings.segment));

        tracing::info!(
            narration_id = %narration_id,
            text_len = text.len(),
            segments = segments.len(),
            max_chars = self.settings.segment.max_chars,
            "Synthesizing narration"
        );

        let narration = Narration {
            text,
            segments: self.synthesize_segments(segments).await,
        };

        let failed = narration.failed_count();
        if failed > 0 {
            tracing::warn!(
                narration_id = %narration_id,
                failed = failed,
                total = narration.segments.len(),
                "Narration completed with failed segments"
            );
        } else {
            tracing::info!(
                narration_id = %narration_id,
                total = narration.segments.len(),
                "Narration completed"
            );
            if !narration.segments.is_empty() {
                self.cache.put(cache_key, narration.clone());
            }
        }

        Ok(NarrateResponse {
            narration,
            cached: false,
        })
    }

    /// 并行合成所有分段，结果按原顺序返回
    ///
    /// 各分段 future 在当前任务内并发执行，调用方取消（超时、断开）时一并取消
    async fn synthesize_segments(&self, segments: Vec<TextSegment>) -> Vec<NarrationSegment> {
        let semaphore = match self.settings.max_concurrent_synthesis {
            0 => None,
            limit => Some(Semaphore::new(limit)),
        };
        let semaphore = semaphore.as_ref();
        let tts_engine = self.tts_engine.as_ref();
        let voice = &self.settings.voice;

        join_all(segments.into_iter().map(|segment| async move {
            // 持有 permit 直到合成完成
            let _permit = match semaphore {
                Some(semaphore) => semaphore.acquire().await.ok(),
                None => None,
            };
            synthesize_segment(tts_engine, voice, segment).await
        }))
        .await
    }
}

/// 合成单个分段，失败转为分段级错误
async fn synthesize_segment(
    tts_engine: &dyn TtsEnginePort,
    voice: &VoiceSettings,
    segment: TextSegment,
) -> NarrationSegment {
    let request = SynthesisRequest {
        text: segment.text.clone(),
        voice: voice.voice.clone(),
        speed: voice.speed,
        lang: voice.lang.clone(),
    };

    match tts_engine.synthesize(request).await {
        Ok(response) => {
            tracing::debug!(
                index = segment.index,
                audio_size = response.audio_data.len(),
                "Segment synthesized"
            );
            NarrationSegment::synthesized(segment, response.audio_data, response.content_type)
        }
        Err(e) => {
            tracing::warn!(index = segment.index, error = %e, "Segment synthesis failed");
            let message = match e {
                TtsError::NotConfigured => e.to_string(),
                _ => format!("TTS error: {}", e),
            };
            NarrationSegment::failed(segment, voice.audio_type.clone(), message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{ChatCompletionPort, NullCache};
    use crate::domain::SegmentConfig;
    use crate::infrastructure::adapters::{FakeChatClient, FakeTtsClient, FakeTtsClientConfig};
    use crate::infrastructure::memory::InMemoryTtlCache;
    use std::time::Duration;

    const LONG_NARRATION: &str = "The castle gates fall silent as the last rider passes through. \
        Torches flicker against the ancient stone walls! \
        Somewhere beyond the hills, FAIL a wolf raises its voice to the moon. \
        Nobody answers. The night belongs to the storm now.";

    struct Fixture {
        chat: Arc<FakeChatClient>,
        tts: Arc<FakeTtsClient>,
        handler: NarrateHandler,
    }

    fn fixture(tts_config: FakeTtsClientConfig, max_chars: usize) -> Fixture {
        let chat = Arc::new(FakeChatClient::new(LONG_NARRATION));
        let tts = Arc::new(FakeTtsClient::new(tts_config).unwrap());
        let text_handler = Arc::new(GenerateTextHandler::new(chat.clone(), Arc::new(NullCache)));
        let cache: Arc<dyn CachePort<Narration>> =
            Arc::new(InMemoryTtlCache::new(8, Duration::from_secs(60)));
        let settings = NarrationSettings {
            segment: SegmentConfig::new(max_chars),
            ..Default::default()
        };
        let handler = NarrateHandler::new(text_handler, tts.clone(), cache, settings);
        Fixture { chat, tts, handler }
    }

    fn failing_tts() -> FakeTtsClientConfig {
        FakeTtsClientConfig {
            fail_marker: Some("FAIL".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_prompt_is_narrated_in_order() {
        let f = fixture(FakeTtsClientConfig::default(), 70);

        let result = f
            .handler
            .handle(NarrateCommand {
                source: NarrationSource::Prompt("a dark night".into()),
                model: None,
            })
            .await
            .unwrap();

        let narration = result.narration;
        assert_eq!(narration.text, LONG_NARRATION);
        assert!(narration.segments.len() > 1);
        assert!(narration.is_complete());
        for (i, segment) in narration.segments.iter().enumerate() {
            assert_eq!(segment.index, i);
            assert!(segment.audio.is_some());
        }
        let joined: Vec<&str> = narration.segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(joined.join(" "), crate::domain::normalize_whitespace(LONG_NARRATION));
        assert_eq!(f.tts.call_count(), narration.segments.len());
    }

    #[tokio::test]
    async fn test_failed_segment_is_isolated() {
        let f = fixture(failing_tts(), 70);

        let narration = f
            .handler
            .handle(NarrateCommand {
                source: NarrationSource::Prompt("a dark night".into()),
                model: None,
            })
            .await
            .unwrap()
            .narration;

        assert_eq!(narration.failed_count(), 1);
        for segment in &narration.segments {
            if segment.text.contains("FAIL") {
                assert!(segment.audio.is_none());
                assert!(segment.error.as_deref().unwrap().starts_with("TTS error:"));
            } else {
                assert!(segment.audio.is_some());
                assert!(segment.error.is_none());
            }
        }
    }

    #[tokio::test]
    async fn test_failed_narration_not_cached() {
        let f = fixture(failing_tts(), 70);
        let cmd = NarrateCommand {
            source: NarrationSource::Prompt("a dark night".into()),
            model: None,
        };

        f.handler.handle(cmd.clone()).await.unwrap();
        let second = f.handler.handle(cmd).await.unwrap();

        assert!(!second.cached);
        assert_eq!(f.chat.call_count(), 2);
    }

    #[tokio::test]
    async fn test_complete_narration_cached() {
        let f = fixture(FakeTtsClientConfig::default(), 200);
        let cmd = NarrateCommand {
            source: NarrationSource::Prompt("a dark night".into()),
            model: Some(f.chat.default_model().to_string()),
        };

        let first = f.handler.handle(cmd.clone()).await.unwrap();
        let calls = f.tts.call_count();
        let second = f.handler.handle(cmd).await.unwrap();

        assert!(second.cached);
        assert_eq!(second.narration, first.narration);
        assert_eq!(f.tts.call_count(), calls);
        assert_eq!(f.chat.call_count(), 1);
    }

    #[tokio::test]
    async fn test_text_source_skips_chat() {
        let f = fixture(FakeTtsClientConfig::default(), 200);

        let narration = f
            .handler
            .handle(NarrateCommand {
                source: NarrationSource::Text("Hello there. This is a test! Really?".into()),
                model: None,
            })
            .await
            .unwrap()
            .narration;

        assert_eq!(f.chat.call_count(), 0);
        assert_eq!(narration.segments.len(), 1);
        assert_eq!(narration.segments[0].text, "Hello there. This is a test! Really?");
    }

    /// 每句单独成批，共 5 段
    const FIVE_SENTENCES: &str = "First sentence is here now. Second sentence is here. \
        Third sentence is here now. Fourth sentence is here. Fifth sentence is here now.";

    fn concurrency_fixture(latency_ms: u64, limit: usize) -> (NarrateHandler, Arc<FakeTtsClient>) {
        let tts = Arc::new(
            FakeTtsClient::new(FakeTtsClientConfig {
                latency_ms,
                ..Default::default()
            })
            .unwrap(),
        );
        let handler = NarrateHandler::new(
            Arc::new(GenerateTextHandler::new(
                Arc::new(FakeChatClient::default()),
                Arc::new(NullCache),
            )),
            tts.clone(),
            Arc::new(NullCache),
            NarrationSettings {
                segment: SegmentConfig::new(30),
                max_concurrent_synthesis: limit,
                ..Default::default()
            },
        );
        (handler, tts)
    }

    fn read_five() -> NarrateCommand {
        NarrateCommand {
            source: NarrationSource::Text(FIVE_SENTENCES.into()),
            model: None,
        }
    }

    #[tokio::test]
    async fn test_segments_synthesized_concurrently() {
        let (handler, tts) = concurrency_fixture(100, 0);

        let started = std::time::Instant::now();
        let narration = handler.handle(read_five()).await.unwrap().narration;
        let elapsed = started.elapsed();

        assert_eq!(narration.segments.len(), 5);
        assert!(narration.is_complete());
        assert_eq!(tts.peak_in_flight(), 5);
        assert!(elapsed < Duration::from_millis(400), "took {:?}", elapsed);
    }

    #[tokio::test]
    async fn test_bounded_concurrency_keeps_order() {
        let (handler, tts) = concurrency_fixture(20, 2);

        let narration = handler.handle(read_five()).await.unwrap().narration;

        let indices: Vec<usize> = narration.segments.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
        assert!(narration.segments[0].text.starts_with("First"));
        assert!(narration.segments[4].text.starts_with("Fifth"));
        assert!(narration.is_complete());
        assert_eq!(tts.call_count(), 5);
        assert_eq!(tts.peak_in_flight(), 2);
    }

    #[tokio::test]
    async fn test_cancelled_request_stops_synthesis() {
        let (handler, tts) = concurrency_fixture(200, 1);

        let result =
            tokio::time::timeout(Duration::from_millis(50), handler.handle(read_five())).await;
        assert!(result.is_err());

        let calls_at_cancel = tts.call_count();
        assert_eq!(calls_at_cancel, 1);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(tts.call_count(), calls_at_cancel);
    }

    #[tokio::test]
    async fn test_blank_text_rejected() {
        let f = fixture(FakeTtsClientConfig::default(), 200);
        let err = f
            .handler
            .handle(NarrateCommand {
                source: NarrationSource::Text("  ".into()),
                model: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_chat_failure_fails_request() {
        let tts = Arc::new(FakeTtsClient::new(FakeTtsClientConfig::default()).unwrap());
        let handler = NarrateHandler::new(
            Arc::new(GenerateTextHandler::new(
                Arc::new(FakeChatClient::failing()),
                Arc::new(NullCache),
            )),
            tts.clone(),
            Arc::new(NullCache),
            NarrationSettings::default(),
        );

        let err = handler
            .handle(NarrateCommand {
                source: NarrationSource::Prompt("anything".into()),
                model: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::ExternalServiceError(_)));
        assert_eq!(tts.call_count(), 0);
    }
}
