//! 解析のオーケストレーション
//!
//! セッションへの送信 → パイプライン実行 → 完了反映 の順に進める。
//! ロックは遷移の瞬間だけ取り、モデル呼び出し中は保持しない。
//! そのため呼び出し中の再送信は `analyzing` 状態によって境界で拒否される。

mod gemini;

pub use gemini::GeminiClient;

use crate::error::Result;
use ffe_inventory_common::{analyze_image, AnalysisRequest, AnalysisSession, AnalysisStatus, VisionClient};
use tokio::sync::Mutex;
use tracing::info;

/// 1件の画像を解析してセッションを終端状態まで進める
///
/// # Returns
/// * `Ok(status)` - `Success` または `Error`（パイプラインの失敗はセッション側に記録される）
/// * `Err(Session(AlreadyAnalyzing))` - 別の解析が進行中のため拒否した
pub async fn run_analysis<C: VisionClient>(
    session: &Mutex<AnalysisSession>,
    client: &C,
    request: AnalysisRequest,
    image_preview: String,
) -> Result<AnalysisStatus> {
    session.lock().await.submit(image_preview)?;

    let outcome = analyze_image(client, &request).await;

    let status = session.lock().await.complete(outcome)?;
    info!(%status, "analysis finished");
    Ok(status)
}
