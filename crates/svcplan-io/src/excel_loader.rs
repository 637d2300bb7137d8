//! Excel 載入（讀取第一個工作表）

use calamine::{open_workbook_auto, Reader};
use std::path::Path;
use svcplan_core::RawTable;

use crate::error::{LoadError, LoadResult};

/// Excel 載入器
#[derive(Debug, Clone, Copy, Default)]
pub struct ExcelLoader;

impl ExcelLoader {
    /// 從 `.xlsx` / `.xls` 檔案載入
    pub fn load_path(&self, path: &Path) -> LoadResult<RawTable> {
        if !path.exists() {
            return Err(LoadError::FileNotFound(path.display().to_string()));
        }

        let mut workbook = open_workbook_auto(path)?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| LoadError::ExcelParseError("Excel 檔案沒有工作表".to_string()))?;

        let range = workbook.worksheet_range(&sheet_name)?;

        let mut rows = range.rows();
        let header_row = rows.next().ok_or(LoadError::MissingHeader)?;
        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut records = Vec::new();
        for data_row in rows {
            let row: Vec<String> = data_row
                .iter()
                .map(|cell| cell.to_string().trim().to_string())
                .collect();

            // 跳過完全空白的行
            if row.iter().all(|v| v.is_empty()) {
                continue;
            }

            records.push(row);
        }

        tracing::debug!(
            "Excel 載入完成：工作表 {}，{} 欄，{} 列",
            sheet_name,
            headers.len(),
            records.len()
        );
        Ok(RawTable::new(headers, records))
    }
}
