//! CSV生成（共通ライブラリ）
//!
//! 1アイテム1行、列は `ID, Name, Description`。
//! ID は内部IDではなく1始まりの連番。表計算ソフトで文字化けしないよう先頭にBOMを付ける。

use std::io::Write;

use super::INVENTORY_HEADERS;
use crate::error::{Error, Result};
use crate::types::DetectedObject;

/// UTF-8 BOM
pub const BOM: &str = "\u{FEFF}";

/// 既定の出力ファイル名
pub const DEFAULT_CSV_FILE_NAME: &str = "FFE_Inventory_List.csv";

/// インベントリCSVを書き出す
///
/// 引用符を含むフィールドは引用符で囲み、内部の `"` は `""` に二重化される。
pub fn write_inventory_csv<W: Write>(items: &[DetectedObject], mut writer: W) -> Result<()> {
    writer.write_all(BOM.as_bytes())?;

    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer.write_record(INVENTORY_HEADERS)?;
    for (index, item) in items.iter().enumerate() {
        let number = (index + 1).to_string();
        csv_writer.write_record([
            number.as_str(),
            item.label.as_str(),
            item.description.as_str(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// インベントリCSVを文字列で返す
pub fn inventory_csv_string(items: &[DetectedObject]) -> Result<String> {
    let mut buffer = Vec::new();
    write_inventory_csv(items, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| Error::Export(format!("CSV encoding error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BoundingBox;

    fn item(index: usize, label: &str, description: &str) -> DetectedObject {
        DetectedObject {
            id: format!("item-{}", index),
            label: label.to_string(),
            description: description.to_string(),
            bounding_box: BoundingBox::new(0.0, 0.0, 1.0, 1.0),
        }
    }

    #[test]
    fn test_csv_starts_with_bom_and_header() {
        let csv = inventory_csv_string(&[]).unwrap();
        assert!(csv.starts_with(BOM));
        assert_eq!(&csv[BOM.len()..], "ID,Name,Description\n");
    }

    #[test]
    fn test_csv_rows_use_sequential_ids() {
        let items = vec![item(0, "Chair 1", "Oak"), item(1, "Chair 2", "Steel")];
        let csv = inventory_csv_string(&items).unwrap();
        let lines: Vec<&str> = csv[BOM.len()..].lines().collect();
        assert_eq!(lines, vec!["ID,Name,Description", "1,Chair 1,Oak", "2,Chair 2,Steel"]);
    }

    #[test]
    fn test_csv_doubles_embedded_quotes() {
        let items = vec![item(0, "Sofa \"Chesterfield\"", "Tufted, leather")];
        let csv = inventory_csv_string(&items).unwrap();
        assert!(csv.contains("1,\"Sofa \"\"Chesterfield\"\"\",\"Tufted, leather\"\n"));
    }

    #[test]
    fn test_csv_ignores_internal_ids() {
        let mut shuffled = item(7, "Lamp", "");
        shuffled.id = "item-7".to_string();
        let csv = inventory_csv_string(&[shuffled]).unwrap();
        assert!(csv.contains("\n1,Lamp,\n"));
        assert!(!csv.contains("item-7"));
    }

    #[test]
    fn test_csv_non_ascii() {
        let items = vec![item(0, "Fauteuil", "Velours côtelé")];
        let csv = inventory_csv_string(&items).unwrap();
        assert!(csv.contains("Velours côtelé"));
    }
}
