//! 解析セッションの状態機械
//!
//! `idle → analyzing → {success | error}` の4状態のみ。
//! 結果・エラーは対応する状態の中にだけ存在するため、
//! 「result は success のときだけ」「error は error のときだけ」が型で保証される。
//!
//! `analyzing` は排他マーカーを兼ねる。解析中の再送信は拒否し、キューイングもキャンセルもしない。

use serde::Serialize;
use tracing::{error, info, warn};

use crate::error::{PipelineError, SessionError};
use crate::types::FfeAnalysis;

/// UI が参照するステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Idle,
    Analyzing,
    Success,
    Error,
}

impl std::fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisStatus::Idle => write!(f, "idle"),
            AnalysisStatus::Analyzing => write!(f, "analyzing"),
            AnalysisStatus::Success => write!(f, "success"),
            AnalysisStatus::Error => write!(f, "error"),
        }
    }
}

/// 状態と、その状態でのみ有効なペイロード
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Analyzing {
        image_preview: String,
    },
    Success {
        image_preview: String,
        result: FfeAnalysis,
    },
    Error {
        image_preview: String,
        message: String,
    },
}

/// 解析セッション（プロセス内で1つ、呼び出し側が所有する）
#[derive(Debug, Clone, Default)]
pub struct AnalysisSession {
    state: SessionState,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn status(&self) -> AnalysisStatus {
        match self.state {
            SessionState::Idle => AnalysisStatus::Idle,
            SessionState::Analyzing { .. } => AnalysisStatus::Analyzing,
            SessionState::Success { .. } => AnalysisStatus::Success,
            SessionState::Error { .. } => AnalysisStatus::Error,
        }
    }

    pub fn image_preview(&self) -> Option<&str> {
        match &self.state {
            SessionState::Idle => None,
            SessionState::Analyzing { image_preview }
            | SessionState::Success { image_preview, .. }
            | SessionState::Error { image_preview, .. } => Some(image_preview),
        }
    }

    pub fn result(&self) -> Option<&FfeAnalysis> {
        match &self.state {
            SessionState::Success { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            SessionState::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn is_analyzing(&self) -> bool {
        matches!(self.state, SessionState::Analyzing { .. })
    }

    /// 画像を送信して `analyzing` へ遷移
    ///
    /// 前回の結果・エラーは破棄する。解析中は `AlreadyAnalyzing` で拒否。
    pub fn submit(&mut self, image_preview: impl Into<String>) -> Result<(), SessionError> {
        if self.is_analyzing() {
            warn!("submission rejected: analysis already in progress");
            return Err(SessionError::AlreadyAnalyzing);
        }
        self.state = SessionState::Analyzing {
            image_preview: image_preview.into(),
        };
        info!("analysis started");
        Ok(())
    }

    /// パイプラインの完了を反映
    ///
    /// 失敗の種類は区別せず固定メッセージで `error` へ。内部の詳細はログにのみ残す。
    pub fn complete(
        &mut self,
        outcome: Result<FfeAnalysis, PipelineError>,
    ) -> Result<AnalysisStatus, SessionError> {
        let image_preview = match std::mem::take(&mut self.state) {
            SessionState::Analyzing { image_preview } => image_preview,
            other => {
                self.state = other;
                return Err(SessionError::NotAnalyzing);
            }
        };

        self.state = match outcome {
            Ok(result) => {
                info!(items = result.items.len(), "analysis succeeded");
                SessionState::Success { image_preview, result }
            }
            Err(e) => {
                error!(error = %e, "analysis failed");
                SessionState::Error {
                    image_preview,
                    message: e.user_message().to_string(),
                }
            }
        };
        Ok(self.status())
    }

    /// `idle` に戻す
    ///
    /// 実行中の呼び出しを取り残さないよう、解析中のリセットは拒否する。
    pub fn reset(&mut self) -> Result<(), SessionError> {
        if self.is_analyzing() {
            return Err(SessionError::AlreadyAnalyzing);
        }
        self.state = SessionState::Idle;
        Ok(())
    }
}
