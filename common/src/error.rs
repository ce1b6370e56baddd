//! エラー型定義
//!
//! パイプラインの失敗は閉じた列挙型で表現し、
//! ユーザー向けメッセージへの変換はオーケストレーション境界で一度だけ行う。

use thiserror::Error;

/// セッションがエラー状態になったときにユーザーへ表示する固定メッセージ
pub const USER_FACING_ERROR: &str =
    "We couldn't analyze the furniture in that image properly. Please try again with a clearer photo.";

/// モデル呼び出しの失敗
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvocationError {
    /// 通信そのものが完了しなかった（接続失敗、タイムアウトなど）
    #[error("model service unreachable: {0}")]
    Transport(String),

    /// サービスがエラーステータスを返した
    #[error("model service returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// レスポンスにテキストが含まれていない
    #[error("no response text received from the model")]
    EmptyResponse,
}

/// レスポンス正規化の失敗
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizationError {
    #[error("model output is not valid analysis JSON: {reason}")]
    MalformedOutput { reason: String },
}

/// パイプライン全体（呼び出し + 正規化）の失敗
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error(transparent)]
    Invocation(#[from] InvocationError),

    #[error(transparent)]
    Normalization(#[from] NormalizationError),
}

impl PipelineError {
    /// 失敗の種類に関わらず同じ文言を返す
    pub fn user_message(&self) -> &'static str {
        USER_FACING_ERROR
    }
}

/// 状態遷移の拒否
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("an analysis is already in progress")]
    AlreadyAnalyzing,

    #[error("no analysis is in progress")]
    NotAnalyzing,
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Export error: {0}")]
    Export(String),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl From<NormalizationError> for Error {
    fn from(e: NormalizationError) -> Self {
        Error::Pipeline(e.into())
    }
}

impl From<InvocationError> for Error {
    fn from(e: InvocationError) -> Self {
        Error::Pipeline(e.into())
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
