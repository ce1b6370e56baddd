//! 解析結果の保存・読込と端末表示

use crate::error::{FfeError, Result};
use ffe_inventory_common::{overlays, FfeAnalysis};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// `<画像名>.ffe.json`（画像と同じディレクトリ）
pub fn default_output_path(image: &Path) -> PathBuf {
    image.with_extension("ffe.json")
}

pub fn save_analysis(analysis: &FfeAnalysis, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(analysis)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn load_analysis(path: &Path) -> Result<FfeAnalysis> {
    if !path.is_file() {
        return Err(FfeError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// 番号付きのインベントリ一覧
pub fn format_inventory(analysis: &FfeAnalysis) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "概要: {}", if analysis.summary.is_empty() { "-" } else { analysis.summary.as_str() });
    let _ = writeln!(
        out,
        "検出数: {}件（モデル申告: {}件） / 信頼度: {:.2}",
        analysis.items.len(),
        analysis.item_count,
        analysis.confidence_score
    );

    if analysis.items.is_empty() {
        let _ = writeln!(out, "  (FF&Eは見つかりませんでした)");
        return out;
    }

    for (index, item) in analysis.items.iter().enumerate() {
        let _ = write!(out, "  {:>3}. {}", index + 1, item.label);
        if !item.description.is_empty() {
            let _ = write!(out, " - {}", item.description);
        }
        if !item.bounding_box.is_well_formed() {
            let _ = write!(out, " [座標が範囲外]");
        }
        out.push('\n');
    }
    out
}

/// 番号付きのオーバーレイ矩形（CSS）
pub fn format_overlays(analysis: &FfeAnalysis) -> String {
    overlays(analysis)
        .iter()
        .map(|o| format!("{:>3}  {:<8} {:<24} {}\n", o.number, o.id, o.label, o.rect.to_css()))
        .collect()
}
