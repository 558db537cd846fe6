// ==========================================
// 仓间调拨建议系统 - 文件解析器实现
// ==========================================
// 阶段 0: 文件读取与解析
// 支持: CSV (.csv)
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::{FileParser, ParsedTable};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl CsvParser {
    /// 从任意 Reader 解析 (便于测试与管道输入)
    pub fn parse_reader<R: Read>(&self, reader: R) -> ImportResult<ParsedTable> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .trim(csv::Trim::All)
            .from_reader(reader);

        // 读取表头
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
            .collect();

        // 读取所有行
        let mut rows = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            let record = result?;
            let mut row_map = HashMap::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), value.trim().to_string());
                }
            }

            // 跳过完全空白的行
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            // 表头为第 1 行, 数据从第 2 行开始
            rows.push((row_idx + 2, row_map));
        }

        Ok(ParsedTable { headers, rows })
    }
}

impl FileParser for CsvParser {
    fn parse_to_table(&self, file_path: &Path) -> ImportResult<ParsedTable> {
        let path = file_path;

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        if let Some(ext) = path.extension() {
            if !ext.eq_ignore_ascii_case("csv") {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        let file = File::open(path)?;
        self.parse_reader(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_reader_with_row_numbers() {
        let data = "Warehouse_ID,Location\nW001, Mumbai \n,\nW002,Delhi\n";
        let table = CsvParser.parse_reader(data.as_bytes()).unwrap();
        assert_eq!(table.headers, vec!["Warehouse_ID", "Location"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].0, 2);
        assert_eq!(table.rows[0].1["Location"], "Mumbai");
        // 空白行被跳过, 行号保持原文件位置
        assert_eq!(table.rows[1].0, 4);
    }

    #[test]
    fn test_missing_file() {
        let err = CsvParser
            .parse_to_table(Path::new("/definitely/not/here.csv"))
            .unwrap_err();
        assert!(matches!(err, ImportError::FileNotFound(_)));
    }

    #[test]
    fn test_unsupported_extension() {
        let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        writeln!(file, "a,b").unwrap();
        let err = CsvParser.parse_to_table(file.path()).unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedFormat(_)));
    }
}
