//! 正規化座標からオーバーレイ矩形への変換
//!
//! 画像はレスポンシブに拡縮されるため、位置はピクセルではなく
//! 画像サイズに対するパーセンテージで表す。丸めは行わない。

use crate::types::{BoundingBox, FfeAnalysis};

/// パーセンテージ表現のレイアウト矩形
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayRect {
    pub top: f64,
    pub left: f64,
    pub height: f64,
    pub width: f64,
}

impl OverlayRect {
    /// 絶対配置用のCSS宣言
    pub fn to_css(&self) -> String {
        format!(
            "top: {}%; left: {}%; height: {}%; width: {}%; position: absolute;",
            self.top, self.left, self.height, self.width
        )
    }
}

impl From<&BoundingBox> for OverlayRect {
    fn from(b: &BoundingBox) -> Self {
        Self {
            top: b.y_min * 100.0,
            left: b.x_min * 100.0,
            height: (b.y_max - b.y_min) * 100.0,
            width: (b.x_max - b.x_min) * 100.0,
        }
    }
}

impl BoundingBox {
    pub fn to_overlay_rect(&self) -> OverlayRect {
        OverlayRect::from(self)
    }
}

/// 番号付きオーバーレイ
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay<'a> {
    /// 1始まりの表示番号（リスト順）
    pub number: usize,
    pub id: &'a str,
    pub label: &'a str,
    pub rect: OverlayRect,
}

/// 解析結果のアイテムをリスト順にオーバーレイへ変換
pub fn overlays(analysis: &FfeAnalysis) -> Vec<Overlay<'_>> {
    analysis
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| Overlay {
            number: index + 1,
            id: &item.id,
            label: &item.label,
            rect: item.bounding_box.to_overlay_rect(),
        })
        .collect()
}
