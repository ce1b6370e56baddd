//! Gemini API連携
//!
//! 画像 + 指示 + 出力スキーマを1回のリクエストで送り、レスポンステキストを返す。
//! パースは正規化側の責務なのでここでは行わない。

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use ffe_inventory_common::{AnalysisRequest, InvocationError, VisionClient};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{FfeError, Result};

/// Gemini APIリクエスト
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<Content<'a>>,
    system_instruction: Content<'a>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part<'a> {
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData<'a>,
    },
    Text {
        text: &'a str,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    temperature: f32,
    response_mime_type: &'static str,
    response_schema: &'a Value,
}

/// Gemini APIレスポンス
#[derive(Deserialize, Default)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Default)]
struct Candidate {
    #[serde(default)]
    content: ResponseContent,
}

#[derive(Deserialize, Default)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Default)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

/// Gemini APIクライアント
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    api_base_url: String,
}

impl GeminiClient {
    /// `timeout` は外部から課すタイムアウト。超過は通信失敗として扱われる
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        api_base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| FfeError::Http(e.to_string()))?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            model: model.into(),
            api_base_url: api_base_url.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let timeout = (config.timeout_seconds > 0).then(|| Duration::from_secs(config.timeout_seconds));
        Self::new(
            config.get_api_key()?,
            config.model.clone(),
            config.api_base_url.clone(),
            timeout,
        )
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base_url.trim_end_matches('/'),
            self.model
        )
    }
}

impl VisionClient for GeminiClient {
    async fn generate(&self, request: &AnalysisRequest) -> std::result::Result<String, InvocationError> {
        let body = build_request_body(request);

        debug!(endpoint = %self.endpoint(), model = %self.model, "sending Gemini request");
        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| InvocationError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!(error = %e, "failed to read error response body");
                    String::new()
                }
            };
            warn!(status = status.as_u16(), "Gemini API returned an error status");
            return Err(InvocationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: GeminiResponse = response
            .json()
            .await
            .map_err(|e| InvocationError::Transport(format!("invalid response body: {}", e)))?;

        extract_text(payload).ok_or(InvocationError::EmptyResponse)
    }
}

fn build_request_body(request: &AnalysisRequest) -> GeminiRequest<'_> {
    GeminiRequest {
        contents: vec![Content {
            parts: vec![
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: &request.image.mime_type,
                        data: STANDARD.encode(&request.image.bytes),
                    },
                },
                Part::Text { text: request.instruction },
            ],
        }],
        system_instruction: Content {
            parts: vec![Part::Text { text: request.system_instruction }],
        },
        generation_config: GenerationConfig {
            temperature: request.temperature,
            response_mime_type: "application/json",
            response_schema: &request.schema,
        },
    }
}

/// 先頭候補のテキストパートを連結。テキストがなければ None
fn extract_text(response: GeminiResponse) -> Option<String> {
    let candidate = response.candidates.into_iter().next()?;
    let text: String = candidate
        .content
        .parts
        .into_iter()
        .filter_map(|p| p.text)
        .collect();

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ffe_inventory_common::ImageInput;

    fn request() -> AnalysisRequest {
        AnalysisRequest::new(ImageInput::new(b"abc".to_vec(), "image/jpeg"))
    }

    #[test]
    fn test_request_body_shape() {
        let request = request();
        let body = serde_json::to_value(build_request_body(&request)).unwrap();

        let parts = &body["contents"][0]["parts"];
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(parts[0]["inlineData"]["data"], "YWJj");
        assert_eq!(parts[1]["text"], request.instruction);

        assert_eq!(body["systemInstruction"]["parts"][0]["text"], request.system_instruction);
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"], request.schema);
        assert!((body["generationConfig"]["temperature"].as_f64().unwrap() - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let payload: GeminiResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "{\"items\":"}, {"text": "[]}"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(payload).as_deref(), Some("{\"items\":[]}"));
    }

    #[test]
    fn test_extract_text_empty_response() {
        let payload: GeminiResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(extract_text(payload).is_none());

        let payload: GeminiResponse =
            serde_json::from_str(r#"{"candidates": [{"content": {"parts": [{"text": "  "}]}}]}"#)
                .unwrap();
        assert!(extract_text(payload).is_none());

        // セーフティでブロックされた場合など content 自体がない
        let payload: GeminiResponse =
            serde_json::from_str(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#).unwrap();
        assert!(extract_text(payload).is_none());
    }

    #[test]
    fn test_endpoint() {
        let client = GeminiClient::new(
            "key",
            "gemini-3-pro-preview",
            "https://example.test/v1beta/",
            None,
        )
        .unwrap();
        assert_eq!(
            client.endpoint(),
            "https://example.test/v1beta/models/gemini-3-pro-preview:generateContent"
        );
    }

    /// 1回だけリクエストを受けて固定の生レスポンスを返すローカルサーバー
    async fn serve_once(raw_response: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            // ヘッダー + Content-Length 分のボディを読み切ってから応答する
            let mut received = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                received.extend_from_slice(&chunk[..n]);

                let text = String::from_utf8_lossy(&received);
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text[..header_end]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            if name.eq_ignore_ascii_case("content-length") {
                                value.trim().parse::<usize>().ok()
                            } else {
                                None
                            }
                        })
                        .unwrap_or(0);
                    if received.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
            }

            socket.write_all(raw_response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_error_status_keeps_body() {
        let base = serve_once(
            "HTTP/1.1 503 Service Unavailable\r\nContent-Length: 10\r\nConnection: close\r\n\r\noverloaded",
        )
        .await;
        let client = GeminiClient::new("key", "test-model", base, Some(Duration::from_secs(5))).unwrap();

        let result = client.generate(&request()).await;
        assert_eq!(
            result,
            Err(InvocationError::Status { status: 503, body: "overloaded".into() })
        );
    }

    #[tokio::test]
    async fn test_error_status_with_truncated_body() {
        // 宣言より短いボディで切断される
        let base = serve_once(
            "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 100\r\nConnection: close\r\n\r\npartial",
        )
        .await;
        let client = GeminiClient::new("key", "test-model", base, Some(Duration::from_secs(5))).unwrap();

        let result = client.generate(&request()).await;
        assert_eq!(
            result,
            Err(InvocationError::Status { status: 500, body: String::new() })
        );
    }

    #[tokio::test]
    async fn test_unreachable_service_is_invocation_error() {
        // 接続先が存在しないポート
        let client = GeminiClient::new(
            "key",
            "test-model",
            "http://127.0.0.1:9",
            Some(Duration::from_secs(5)),
        )
        .unwrap();
        let result = client.generate(&request()).await;
        assert!(matches!(result, Err(InvocationError::Transport(_))));
    }
}
