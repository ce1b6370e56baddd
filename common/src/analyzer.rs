//! 解析パイプライン（CLI/テスト共通）
//!
//! モデル呼び出し → 正規化 を1回だけ行う。リトライはしない。

use tracing::debug;

use crate::client::{AnalysisRequest, VisionClient};
use crate::error::PipelineError;
use crate::normalizer::normalize_response;
use crate::types::FfeAnalysis;

/// 画像を解析して正規化済みの結果を返す
pub async fn analyze_image<C>(client: &C, request: &AnalysisRequest) -> Result<FfeAnalysis, PipelineError>
where
    C: VisionClient,
{
    debug!(
        mime_type = %request.image.mime_type,
        bytes = request.image.bytes.len(),
        "invoking vision model"
    );
    let text = client.generate(request).await?;
    debug!(chars = text.len(), "model response received");

    let analysis = normalize_response(&text)?;
    debug!(
        items = analysis.items.len(),
        reported = analysis.item_count,
        "response normalized"
    );
    Ok(analysis)
}
