//! 検出結果の正規化
//!
//! モデル出力（テキスト）から `FfeAnalysis` を組み立てる純粋関数群。
//!
//! ## 処理フロー
//! 1. コードフェンス除去とパース（失敗時のみエラー）
//! 2. items 欠損時は空リストで補完
//! 3. 重複ラベルに連番を付与（"Chair" → "Chair 1", "Chair 2"）
//! 4. リスト位置から `item-<index>` のIDを付与
//!
//! バウンディングボックスは補正せずそのまま通す。

use std::collections::HashMap;

use crate::error::NormalizationError;
use crate::parser::parse_raw_response;
use crate::types::{DetectedObject, FfeAnalysis, RawAnalysis, RawItem};

/// レスポンステキストを正規化して解析結果を返す
pub fn normalize_response(response: &str) -> Result<FfeAnalysis, NormalizationError> {
    let raw = parse_raw_response(response)?;
    Ok(normalize_raw(raw))
}

/// パース済みの中間構造を正規化
pub fn normalize_raw(raw: RawAnalysis) -> FfeAnalysis {
    let items = raw.items.unwrap_or_default();
    let labels = disambiguate_labels(items.iter().map(|item| item.label.as_str()));

    let items = items
        .into_iter()
        .zip(labels)
        .enumerate()
        .map(|(index, (item, label))| {
            let RawItem { description, box_2d, .. } = item;
            DetectedObject {
                id: item_id(index),
                label,
                description,
                bounding_box: box_2d,
            }
        })
        .collect();

    FfeAnalysis {
        item_count: raw.item_count,
        summary: raw.summary,
        items,
        confidence_score: raw.confidence_score,
    }
}

/// 重複ラベルにグループごとの1始まり連番を付与
///
/// 1回しか出現しないラベルはそのまま。順序は入力順を保つ。
pub fn disambiguate_labels<'a, I>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
    I::IntoIter: Clone,
{
    let labels = labels.into_iter();

    let mut totals: HashMap<&str, usize> = HashMap::new();
    for label in labels.clone() {
        *totals.entry(label).or_insert(0) += 1;
    }

    let mut running: HashMap<&str, usize> = HashMap::new();
    labels
        .map(|label| {
            if totals.get(label).copied().unwrap_or(0) > 1 {
                let counter = running.entry(label).or_insert(0);
                *counter += 1;
                format!("{} {}", label, counter)
            } else {
                label.to_string()
            }
        })
        .collect()
}

/// リスト位置から決まるアイテムID
pub fn item_id(index: usize) -> String {
    format!("item-{}", index)
}
