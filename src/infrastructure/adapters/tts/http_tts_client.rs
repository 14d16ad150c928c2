//! HTTP TTS Client - 调用外部 TTS 推理服务
//!
//! 实现 TtsEnginePort trait，通过 HTTP 调用 Hugging Face 推理风格的 TTS 服务
//!
//! 外部 TTS API:
//! POST {url}
//! Request: {"inputs": "...", "parameters": {"voice": "af_bella", "speed": 1.0, "lang": "en-us"}}  (JSON, Bearer 鉴权)
//! Response: 音频文件二进制（audio/wav 等）

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::application::ports::{SynthesisRequest, SynthesisResponse, TtsEnginePort, TtsError};

/// TTS 推理请求体 (JSON)
#[derive(Debug, Serialize)]
struct TtsHttpRequest<'a> {
    /// 要合成的文本
    inputs: &'a str,
    parameters: TtsHttpParameters<'a>,
}

#[derive(Debug, Serialize)]
struct TtsHttpParameters<'a> {
    voice: &'a str,
    speed: f32,
    lang: &'a str,
}

/// HTTP TTS 客户端配置
#[derive(Debug, Clone)]
pub struct HttpTtsClientConfig {
    /// TTS 推理 URL
    pub url: String,
    /// API Key，未配置时在调用时报错
    pub api_key: Option<String>,
    /// 后端未返回 Content-Type 时使用的 MIME 类型
    pub audio_type: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpTtsClientConfig {
    fn default() -> Self {
        Self {
            url: "https://api-inference.huggingface.co/models/hexgrad/Kokoro-82M".to_string(),
            api_key: None,
            audio_type: "audio/wav".to_string(),
            timeout_secs: 120,
        }
    }
}

impl HttpTtsClientConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

/// HTTP TTS 客户端
///
/// 所有分段共享同一个连接池
pub struct HttpTtsClient {
    client: Client,
    config: HttpTtsClientConfig,
}

impl HttpTtsClient {
    /// 创建新的 HTTP TTS 客户端
    pub fn new(config: HttpTtsClientConfig) -> Result<Self, TtsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TtsError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn api_key(&self) -> Result<&str, TtsError> {
        self.config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(TtsError::NotConfigured)
    }
}

#[async_trait]
impl TtsEnginePort for HttpTtsClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisResponse, TtsError> {
        let api_key = self.api_key()?;

        let http_request = TtsHttpRequest {
            inputs: &request.text,
            parameters: TtsHttpParameters {
                voice: &request.voice,
                speed: request.speed,
                lang: &request.lang,
            },
        };

        tracing::debug!(
            url = %self.config.url,
            text_len = request.text.len(),
            voice = %request.voice,
            "Sending TTS request"
        );

        let response = self
            .client
            .post(&self.config.url)
            .bearer_auth(api_key)
            .json(&http_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TtsError::Timeout
                } else if e.is_connect() {
                    TtsError::NetworkError(format!("Cannot connect to TTS service: {}", e))
                } else {
                    TtsError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TtsError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|v| v.starts_with("audio/"))
            .map(str::to_string)
            .unwrap_or_else(|| self.config.audio_type.clone());

        let audio_data = response
            .bytes()
            .await
            .map_err(|e| TtsError::InvalidResponse(format!("Failed to read audio: {}", e)))?
            .to_vec();

        if audio_data.is_empty() {
            return Err(TtsError::InvalidResponse("Empty audio body".to_string()));
        }

        tracing::info!(
            content_type = %content_type,
            audio_size = audio_data.len(),
            "TTS synthesis completed"
        );

        Ok(SynthesisResponse {
            audio_data,
            content_type,
        })
    }

    async fn health_check(&self) -> bool {
        self.api_key().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn request(text: &str) -> SynthesisRequest {
        SynthesisRequest {
            text: text.to_string(),
            voice: "af_bella".to_string(),
            speed: 1.0,
            lang: "en-us".to_string(),
        }
    }

    #[test]
    fn test_config_default() {
        let config = HttpTtsClientConfig::default();
        assert!(config.url.ends_with("hexgrad/Kokoro-82M"));
        assert_eq!(config.timeout_secs, 120);
        assert_eq!(config.audio_type, "audio/wav");
    }

    fn keyed_config(url: String, api_key: &str) -> HttpTtsClientConfig {
        HttpTtsClientConfig {
            api_key: Some(api_key.to_string()),
            ..HttpTtsClientConfig::new(url)
        }
    }

    #[test]
    fn test_config_new() {
        let config = HttpTtsClientConfig::new("http://example.com:9000/tts");
        assert_eq!(config.url, "http://example.com:9000/tts");
        assert!(config.api_key.is_none());
        assert_eq!(config.timeout_secs, 120);
    }

    #[tokio::test]
    async fn test_synthesize_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/tts")
            .match_header("authorization", "Bearer hf-key")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "inputs": "The end.",
                "parameters": {"voice": "af_bella", "lang": "en-us"}
            })))
            .with_status(200)
            .with_header("content-type", "audio/flac")
            .with_body(b"RIFFDATA".as_slice())
            .create_async()
            .await;

        let client = HttpTtsClient::new(
            keyed_config(format!("{}/tts", server.url()), "hf-key"),
        )
        .unwrap();
        let response = client.synthesize(request("The end.")).await.unwrap();

        assert_eq!(response.audio_data, b"RIFFDATA".to_vec());
        assert_eq!(response.content_type, "audio/flac");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_falls_back_to_configured_audio_type() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/tts")
            .with_status(200)
            .with_header("content-type", "application/octet-stream")
            .with_body(b"bytes".as_slice())
            .create_async()
            .await;

        let client = HttpTtsClient::new(
            keyed_config(format!("{}/tts", server.url()), "k"),
        )
        .unwrap();
        let response = client.synthesize(request("Hi.")).await.unwrap();
        assert_eq!(response.content_type, "audio/wav");
    }

    #[tokio::test]
    async fn test_service_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/tts")
            .with_status(503)
            .with_body("model loading")
            .create_async()
            .await;

        let client = HttpTtsClient::new(
            keyed_config(format!("{}/tts", server.url()), "k"),
        )
        .unwrap();
        let err = client.synthesize(request("Hi.")).await.unwrap_err();
        assert!(matches!(err, TtsError::ServiceError(msg) if msg.contains("model loading")));
    }

    #[tokio::test]
    async fn test_not_configured_without_key() {
        let client = HttpTtsClient::new(HttpTtsClientConfig::new("http://127.0.0.1:9/tts")).unwrap();
        assert!(!client.health_check().await);
        let err = client.synthesize(request("Hi.")).await.unwrap_err();
        assert!(matches!(err, TtsError::NotConfigured));
    }
}
