//! インベントリ表のファイル出力（CSV / Excel）

use crate::cli::ExportFormat;
use crate::error::Result;
use ffe_inventory_common::export::csv_core::{write_inventory_csv, DEFAULT_CSV_FILE_NAME};
use ffe_inventory_common::export::excel_core::{generate_inventory_xlsx, DEFAULT_XLSX_FILE_NAME};
use ffe_inventory_common::DetectedObject;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;

fn output_path_for_format(output: &Path, default_name: &str, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(default_name)
    } else {
        output.with_extension(extension)
    }
}

/// CSVを書き出す
pub fn write_csv(items: &[DetectedObject], path: &Path) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    write_inventory_csv(items, writer)?;
    info!(path = %path.display(), rows = items.len(), "CSV written");
    Ok(())
}

/// Excelを書き出す
pub fn write_xlsx(items: &[DetectedObject], path: &Path) -> Result<()> {
    let buffer = generate_inventory_xlsx(items)?;
    std::fs::write(path, buffer)?;
    info!(path = %path.display(), rows = items.len(), "Excel written");
    Ok(())
}

/// 形式に応じて出力し、書き出したパスを返す
///
/// `output` がディレクトリ（または拡張子なし）のときは既定のファイル名を使う
pub fn export_items(
    items: &[DetectedObject],
    format: &ExportFormat,
    output: &Path,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    if matches!(format, ExportFormat::Csv | ExportFormat::Both) {
        let path = output_path_for_format(output, DEFAULT_CSV_FILE_NAME, "csv");
        write_csv(items, &path)?;
        written.push(path);
    }

    if matches!(format, ExportFormat::Excel | ExportFormat::Both) {
        let path = output_path_for_format(output, DEFAULT_XLSX_FILE_NAME, "xlsx");
        write_xlsx(items, &path)?;
        written.push(path);
    }

    Ok(written)
}
