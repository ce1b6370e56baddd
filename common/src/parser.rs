//! APIレスポンスパーサー
//!
//! モデルのレスポンステキストからJSON部分を取り出し、
//! 中間構造 `RawAnalysis` にパースする

use crate::error::NormalizationError;
use crate::types::RawAnalysis;

/// コードフェンスを取り除いた本文を返す
///
/// 抽出優先順位:
/// 1. 先頭が ```json（言語指定なしの ``` も可）なら、その中身（閉じフェンスはなくてもよい）
/// 2. 前後に文章を挟んだ ``` ... ``` ブロックの中身
/// 3. 末尾の閉じフェンスだけがある場合はその手前
/// 4. フェンスがなければ前後の空白を除いた全体
///
/// # Examples
/// ```
/// use ffe_inventory_common::strip_code_fences;
///
/// assert_eq!(strip_code_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
/// assert_eq!(strip_code_fences("{\"a\": 1}\n```"), "{\"a\": 1}");
/// assert_eq!(strip_code_fences("  {\"a\": 1} "), "{\"a\": 1}");
/// ```
pub fn strip_code_fences(response: &str) -> &str {
    let text = response.trim();

    if let Some(after_open) = text.strip_prefix(FENCE) {
        return fenced_body(after_open);
    }

    let Some(open) = text.find(FENCE) else {
        return text;
    };
    let after_open = &text[open + FENCE.len()..];
    if after_open.contains(FENCE) {
        fenced_body(after_open)
    } else {
        // 閉じフェンスのみ
        text[..open].trim()
    }
}

const FENCE: &str = "```";

/// 開始フェンス直後から、言語指定を読み飛ばして閉じフェンスまでを返す
fn fenced_body(after_open: &str) -> &str {
    let body_start = match after_open.find('\n') {
        Some(newline) => newline + 1,
        None => after_open
            .strip_prefix("json")
            .map_or(0, |_| "json".len()),
    };
    let body = &after_open[body_start..];

    match body.find(FENCE) {
        Some(close) => body[..close].trim(),
        None => body.trim(),
    }
}

/// レスポンステキストを中間構造にパース
///
/// # Returns
/// * `Ok(RawAnalysis)` - パース成功（欠損フィールドはデフォルト値）
/// * `Err(MalformedOutput)` - JSONとして解釈できない場合
pub fn parse_raw_response(response: &str) -> Result<RawAnalysis, NormalizationError> {
    let json_str = strip_code_fences(response);
    serde_json::from_str(json_str).map_err(|e| NormalizationError::MalformedOutput {
        reason: e.to_string(),
    })
}
