//! Fake TTS Client - 本地运行/测试用的 TTS 客户端
//!
//! 始终返回固定的音频，不实际调用 TTS 服务

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::application::ports::{SynthesisRequest, SynthesisResponse, TtsEnginePort, TtsError};

/// Fake TTS Client 配置
#[derive(Debug, Clone)]
pub struct FakeTtsClientConfig {
    /// 固定返回的音频文件路径，为 None 时返回一段静音 WAV
    pub audio_file_path: Option<PathBuf>,
    /// 静音 WAV 时长（毫秒）
    pub duration_ms: u64,
    /// 静音 WAV 采样率
    pub sample_rate: u32,
    /// 模拟推理延迟（毫秒）
    pub latency_ms: u64,
    /// 文本包含该标记时合成失败
    pub fail_marker: Option<String>,
}

impl Default for FakeTtsClientConfig {
    fn default() -> Self {
        Self {
            audio_file_path: None,
            duration_ms: 500,
            sample_rate: 22050,
            latency_ms: 0,
            fail_marker: None,
        }
    }
}

/// Fake TTS Client
pub struct FakeTtsClient {
    config: FakeTtsClientConfig,
    /// 缓存的音频数据
    audio_data: Vec<u8>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    /// 同时进行中的调用数峰值
    peak_in_flight: AtomicUsize,
}

impl FakeTtsClient {
    /// 创建新的 FakeTtsClient
    pub fn new(config: FakeTtsClientConfig) -> Result<Self, std::io::Error> {
        let audio_data = match &config.audio_file_path {
            Some(path) => std::fs::read(path)?,
            None => silent_wav(config.duration_ms, config.sample_rate),
        };
        tracing::info!(
            path = ?config.audio_file_path,
            audio_size = audio_data.len(),
            fail_marker = ?config.fail_marker,
            "FakeTtsClient initialized"
        );
        Ok(Self {
            config,
            audio_data,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        })
    }

    /// 使用默认配置创建
    pub fn with_defaults() -> Result<Self, std::io::Error> {
        Self::new(FakeTtsClientConfig::default())
    }

    /// 已处理的调用次数
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// 同时进行中的调用数峰值
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

/// 进行中调用计数，drop 时（含调用被取消）减一
struct InFlightGuard<'a>(&'a AtomicUsize);

impl<'a> InFlightGuard<'a> {
    fn enter(counter: &'a AtomicUsize, peak: &AtomicUsize) -> Self {
        let current = counter.fetch_add(1, Ordering::SeqCst) + 1;
        peak.fetch_max(current, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl TtsEnginePort for FakeTtsClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisResponse, TtsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let _in_flight = InFlightGuard::enter(&self.in_flight, &self.peak_in_flight);
        tracing::debug!(
            text_len = request.text.len(),
            voice = %request.voice,
            "FakeTtsClient: returning fixed audio"
        );

        if self.config.latency_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.config.latency_ms)).await;
        }

        if let Some(marker) = &self.config.fail_marker {
            if request.text.contains(marker.as_str()) {
                return Err(TtsError::ServiceError(format!(
                    "simulated failure for text containing {:?}",
                    marker
                )));
            }
        }

        Ok(SynthesisResponse {
            audio_data: self.audio_data.clone(),
            content_type: "audio/wav".to_string(),
        })
    }
}

/// 生成单声道 16-bit PCM 静音 WAV
pub fn silent_wav(duration_ms: u64, sample_rate: u32) -> Vec<u8> {
    const CHANNELS: u16 = 1;
    const BITS_PER_SAMPLE: u16 = 16;

    let block_align = CHANNELS * BITS_PER_SAMPLE / 8;
    let byte_rate = sample_rate * block_align as u32;
    let samples = (sample_rate as u64 * duration_ms / 1000) as u32;
    let data_len = samples * block_align as u32;

    let mut wav = Vec::with_capacity(44 + data_len as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&CHANNELS.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());
    wav.resize(44 + data_len as usize, 0);
    wav
}
