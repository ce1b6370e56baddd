//! Excel生成（共通ライブラリ）
//!
//! CSVと同じ `ID, Name, Description` の表を1シートに出力する

use rust_xlsxwriter::*;

use super::INVENTORY_HEADERS;
use crate::error::{Error, Result};
use crate::types::DetectedObject;

/// 既定の出力ファイル名
pub const DEFAULT_XLSX_FILE_NAME: &str = "FFE_Inventory_List.xlsx";

const SHEET_NAME: &str = "FF&E Inventory";
const COLUMN_WIDTHS: [f64; 3] = [6.0, 32.0, 60.0];

/// Excelをバッファに生成
pub fn generate_inventory_xlsx(items: &[DetectedObject]) -> Result<Vec<u8>> {
    build_workbook(items)
        .and_then(|mut workbook| workbook.save_to_buffer())
        .map_err(|e| Error::Export(format!("Excel生成エラー: {}", e)))
}

fn build_workbook(items: &[DetectedObject]) -> std::result::Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));

    let value_format = Format::new()
        .set_align(FormatAlign::Top)
        .set_text_wrap()
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, (header, width)) in INVENTORY_HEADERS.iter().zip(COLUMN_WIDTHS).enumerate() {
        let col = col as u16;
        worksheet.set_column_width(col, width)?;
        worksheet.write_string_with_format(0, col, *header, &header_format)?;
    }

    for (index, item) in items.iter().enumerate() {
        let row = (index + 1) as u32;
        worksheet.write_number_with_format(row, 0, (index + 1) as f64, &value_format)?;
        worksheet.write_string_with_format(row, 1, &item.label, &value_format)?;
        worksheet.write_string_with_format(row, 2, &item.description, &value_format)?;
    }

    worksheet.set_freeze_panes(1, 0)?;
    Ok(workbook)
}
