//! 解析結果の型定義
//!
//! - RawAnalysis / RawItem: モデル出力をそのまま受ける中間構造
//! - DetectedObject / FfeAnalysis: 正規化後の最終出力（CLI・エクスポートで共有）

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// 正規化座標の矩形 `[ymin, xmin, ymax, xmax]`
///
/// 各成分は画像の高さ・幅に対する比率（原点は左上）。
/// JSON上は4要素の配列として表現する。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BoundingBox {
    pub y_min: f64,
    pub x_min: f64,
    pub y_max: f64,
    pub x_max: f64,
}

impl BoundingBox {
    pub fn new(y_min: f64, x_min: f64, y_max: f64, x_max: f64) -> Self {
        Self { y_min, x_min, y_max, x_max }
    }

    /// 全成分が `[0,1]` に収まり、min ≤ max を満たすか
    ///
    /// 判定のみで値は変更しない。
    pub fn is_well_formed(&self) -> bool {
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);
        in_unit(self.y_min)
            && in_unit(self.x_min)
            && in_unit(self.y_max)
            && in_unit(self.x_max)
            && self.y_min <= self.y_max
            && self.x_min <= self.x_max
    }
}

impl From<[f64; 4]> for BoundingBox {
    fn from([y_min, x_min, y_max, x_max]: [f64; 4]) -> Self {
        Self { y_min, x_min, y_max, x_max }
    }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.y_min, b.x_min, b.y_max, b.x_max]
    }
}

/// モデル出力の1アイテム（正規化前）
///
/// `label` と `box_2d` は必須。`description` は欠損・null とも空文字列にする。
#[derive(Debug, Clone, Deserialize)]
pub struct RawItem {
    pub label: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    pub box_2d: BoundingBox,
}

/// モデル出力全体（正規化前）
///
/// スキーマ宣言はモデルへの助言にすぎないため、
/// トップレベルの欠損・null のフィールドはデフォルト値で補う。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawAnalysis {
    #[serde(deserialize_with = "lenient_count")]
    pub item_count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub summary: String,
    pub items: Option<Vec<RawItem>>,
    #[serde(deserialize_with = "lenient_score")]
    pub confidence_score: f64,
}

/// null をデフォルト値として読む
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// 数値（`2.0` のような小数表記や `"2"` も可）を件数として読む。小数部は切り捨て
fn lenient_count<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().map(|f| f as i64),
        _ => None,
    }
    .unwrap_or_default())
}

/// 数値（`"0.8"` のような文字列も可）をスコアとして読む
fn lenient_score<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
    .unwrap_or_default())
}

/// 検出されたFF&Eアイテム
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedObject {
    /// 解析結果内で一意なID（`item-<index>`）
    pub id: String,
    /// 表示名（正規化後はリスト内で一意）
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "box_2d")]
    pub bounding_box: BoundingBox,
}

/// FF&E解析結果
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FfeAnalysis {
    /// モデルが報告した件数（items.len() とは照合しない）
    pub item_count: i64,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub items: Vec<DetectedObject>,
    pub confidence_score: f64,
}
