//! 檔案載入錯誤類型

use thiserror::Error;

/// 表格載入錯誤
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("找不到檔案: {0}")]
    FileNotFound(String),

    #[error("不支援的檔案格式: {0}（僅支援 csv、xlsx、xls）")]
    UnsupportedFormat(String),

    #[error("檔案讀取錯誤: {0}")]
    FileReadError(String),

    #[error("CSV 解析錯誤: {0}")]
    CsvParseError(String),

    #[error("Excel 解析錯誤: {0}")]
    ExcelParseError(String),

    #[error("檔案沒有表頭列")]
    MissingHeader,
}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        LoadError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        LoadError::CsvParseError(err.to_string())
    }
}

impl From<calamine::Error> for LoadError {
    fn from(err: calamine::Error) -> Self {
        LoadError::ExcelParseError(err.to_string())
    }
}

pub type LoadResult<T> = Result<T, LoadError>;
