//! Export core modules shared across the CLI wrappers.

pub mod csv_core;

#[cfg(feature = "excel")]
pub mod excel_core;

/// 出力表の列見出し
pub const INVENTORY_HEADERS: [&str; 3] = ["ID", "Name", "Description"];
