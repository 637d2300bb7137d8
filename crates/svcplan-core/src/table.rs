//! 原始表格模型（由檔案載入層提供）

use serde::{Deserialize, Serialize};
use std::fmt;

/// 表格來源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableKind {
    /// 計劃範本（必填）
    Plan,
    /// 實際結果（選填）
    Actual,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Plan => write!(f, "計劃範本"),
            TableKind::Actual => write!(f, "實際結果"),
        }
    }
}

/// 已解碼的表格：一列表頭加上字串儲存格
///
/// 每列長度可以與表頭不同，缺少的儲存格視為空字串。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTable {
    /// 表頭（原樣保留，正規化由整合層處理）
    pub headers: Vec<String>,

    /// 資料列
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// 創建新的表格
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// 以第一列作為表頭建立表格
    pub fn from_rows(mut rows: Vec<Vec<String>>) -> Self {
        if rows.is_empty() {
            return Self::default();
        }
        let headers = rows.remove(0);
        Self { headers, rows }
    }

    /// 建構器模式：追加一列
    pub fn with_row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    /// 取得儲存格，超出範圍時回傳空字串
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// 檢查是否為完全空白的列
    pub fn is_blank_row(&self, row: usize) -> bool {
        self.rows
            .get(row)
            .map_or(true, |r| r.iter().all(|c| c.trim().is_empty()))
    }

    /// 資料列數量
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
