//! モデル呼び出しの契約
//!
//! 実際のHTTP通信はCLI側（Gemini）が実装する。
//! ここでは1回のリクエストに載せる内容と、クライアントが満たすべきトレイトだけを定義する。

use std::future::Future;

use serde_json::Value;

use crate::error::InvocationError;
use crate::prompts::{response_schema, ANALYSIS_INSTRUCTION, DEFAULT_TEMPERATURE, SYSTEM_INSTRUCTION};

/// 解析対象の画像
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInput {
    pub bytes: Vec<u8>,
    /// 例: "image/jpeg"
    pub mime_type: String,
}

impl ImageInput {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self { bytes, mime_type: mime_type.into() }
    }
}

/// 1回の構造化リクエスト（画像 + 指示 + 出力スキーマ + 温度）
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub image: ImageInput,
    pub instruction: &'static str,
    pub system_instruction: &'static str,
    pub schema: Value,
    pub temperature: f32,
}

impl AnalysisRequest {
    pub fn new(image: ImageInput) -> Self {
        Self::with_temperature(image, DEFAULT_TEMPERATURE)
    }

    pub fn with_temperature(image: ImageInput, temperature: f32) -> Self {
        Self {
            image,
            instruction: ANALYSIS_INSTRUCTION,
            system_instruction: SYSTEM_INSTRUCTION,
            schema: response_schema(),
            temperature,
        }
    }
}

/// ビジョンモデルのクライアント
///
/// 成功時はレスポンステキストをそのまま返す（パースはしない）。
/// 通信失敗やテキストなしの応答は `InvocationError` とする。
pub trait VisionClient {
    fn generate(
        &self,
        request: &AnalysisRequest,
    ) -> impl Future<Output = Result<String, InvocationError>> + Send;
}
