//! FF&E Inventory Common Library
//!
//! CLIとテストで共有される、I/Oを持たない検出結果パイプライン:
//! 型定義、座標変換、レスポンス正規化、セッション状態機械、表エクスポート

pub mod types;
pub mod geometry;
pub mod error;
pub mod parser;
pub mod normalizer;
pub mod prompts;
pub mod client;
pub mod analyzer;
pub mod session;
pub mod export;

pub use types::{BoundingBox, DetectedObject, FfeAnalysis, RawAnalysis, RawItem};
pub use geometry::{overlays, Overlay, OverlayRect};
pub use error::{
    Error, InvocationError, NormalizationError, PipelineError, Result, SessionError,
    USER_FACING_ERROR,
};
pub use parser::{parse_raw_response, strip_code_fences};
pub use normalizer::{disambiguate_labels, normalize_raw, normalize_response};
pub use client::{AnalysisRequest, ImageInput, VisionClient};
pub use analyzer::analyze_image;
pub use session::{AnalysisSession, AnalysisStatus, SessionState};
