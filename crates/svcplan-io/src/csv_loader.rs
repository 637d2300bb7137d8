//! CSV 載入

use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use svcplan_core::RawTable;

use crate::error::{LoadError, LoadResult};

/// CSV 載入器
#[derive(Debug, Clone, Copy)]
pub struct CsvLoader {
    delimiter: u8,
}

impl CsvLoader {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    /// 建構器模式：設置分隔符號（常見為 `,` 或 `;`）
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// 從檔案載入
    pub fn load_path(&self, path: &Path) -> LoadResult<RawTable> {
        if !path.exists() {
            return Err(LoadError::FileNotFound(path.display().to_string()));
        }

        let file = File::open(path)?;
        self.load_reader(file)
    }

    /// 從任意來源載入（例如上傳的位元組）
    pub fn load_reader<R: Read>(&self, reader: R) -> LoadResult<RawTable> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.delimiter)
            .flexible(true) // 允許行長度不一致
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(LoadError::MissingHeader);
        }

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let row: Vec<String> = record.iter().map(|v| v.trim().to_string()).collect();

            // 跳過完全空白的行
            if row.iter().all(|v| v.is_empty()) {
                continue;
            }

            rows.push(row);
        }

        tracing::debug!("CSV 載入完成：{} 欄，{} 列", headers.len(), rows.len());
        Ok(RawTable::new(headers, rows))
    }
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_reader() {
        let data = "servico,tempo\nCorte,1\n,\nEscova,2\n";
        let table = CsvLoader::new().load_reader(data.as_bytes()).unwrap();

        assert_eq!(table.headers, vec!["servico", "tempo"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(1, 0), "Escova");
    }

    #[test]
    fn test_semicolon_delimiter_keeps_decimal_comma() {
        let data = "servico;venda\nCorte;\"R$ 45,90\"\n";
        let table = CsvLoader::new()
            .with_delimiter(b';')
            .load_reader(data.as_bytes())
            .unwrap();

        assert_eq!(table.cell(0, 1), "R$ 45,90");
    }

    #[test]
    fn test_flexible_rows() {
        let data = "servico,tempo,custo\nCorte,1\n";
        let table = CsvLoader::new().load_reader(data.as_bytes()).unwrap();

        assert_eq!(table.cell(0, 1), "1");
        assert_eq!(table.cell(0, 2), "");
    }

    #[test]
    fn test_load_path() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, " Servico , Quantidade ").unwrap();
        writeln!(temp_file, "Corte,30").unwrap();

        let table = CsvLoader::new().load_path(temp_file.path()).unwrap();

        assert_eq!(table.headers, vec!["Servico", "Quantidade"]);
        assert_eq!(table.cell(0, 1), "30");
    }

    #[test]
    fn test_missing_file() {
        let err = CsvLoader::new()
            .load_path(Path::new("/nonexistent/plan.csv"))
            .unwrap_err();
        assert!(matches!(err, LoadError::FileNotFound(_)));
    }

    #[test]
    fn test_empty_input() {
        let err = CsvLoader::new().load_reader("".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingHeader));
    }
}
