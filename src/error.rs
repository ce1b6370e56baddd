use ffe_inventory_common::SessionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FfeError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIキーが設定されていません。`ffe-inventory config --set-api-key YOUR_KEY` で設定するか GEMINI_API_KEY を指定してください")]
    MissingApiKey,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("画像ファイルではありません: {0}")]
    UnsupportedImage(String),

    #[error("HTTPクライアント初期化エラー: {0}")]
    Http(String),

    #[error("解析に失敗しました: {0}")]
    AnalysisFailed(String),

    #[error("セッションエラー: {0}")]
    Session(#[from] SessionError),

    #[error(transparent)]
    Common(#[from] ffe_inventory_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FfeError>;
