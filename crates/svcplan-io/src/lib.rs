//! # Service Plan IO
//!
//! 表格載入層：將上傳的 CSV / Excel 檔案轉為 [`RawTable`]

pub mod csv_loader;
pub mod error;
pub mod excel_loader;

// Re-export 主要類型
pub use csv_loader::CsvLoader;
pub use error::{LoadError, LoadResult};
pub use excel_loader::ExcelLoader;

use std::path::Path;
use svcplan_core::RawTable;

/// 通用表格載入器（依副檔名自動選擇）
#[derive(Debug, Clone, Copy, Default)]
pub struct TableLoader {
    csv: CsvLoader,
}

impl TableLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置 CSV 分隔符號
    pub fn with_csv_delimiter(mut self, delimiter: u8) -> Self {
        self.csv = self.csv.with_delimiter(delimiter);
        self
    }

    /// 載入檔案
    pub fn load<P: AsRef<Path>>(&self, path: P) -> LoadResult<RawTable> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        tracing::info!("載入表格: {}", path.display());

        match ext.as_str() {
            "csv" => self.csv.load_path(path),
            "xlsx" | "xls" => ExcelLoader.load_path(path),
            _ => Err(LoadError::UnsupportedFormat(ext)),
        }
    }
}
