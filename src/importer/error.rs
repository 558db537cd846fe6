// ==========================================
// 仓间调拨建议系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 行级问题记入 DQ 报告, 只有文件级问题走错误通道
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("缺少必需列 ({source_name}): {columns:?}")]
    MissingColumns {
        source_name: String,
        columns: Vec<String>,
    },

    // ===== 数据映射错误 =====
    #[error("类型转换失败 (行 {row}, 字段 {field}): {message}")]
    TypeConversionError {
        row: usize,
        field: String,
        message: String,
    },

    #[error("日期格式错误 (行 {row}, 字段 {field}): 期望 YYYY-MM-DD，实际 {value}")]
    DateFormatError {
        row: usize,
        field: String,
        value: String,
    },

}

impl ImportError {
    /// 行级错误对应的字段名
    pub fn field(&self) -> Option<&str> {
        match self {
            ImportError::TypeConversionError { field, .. }
            | ImportError::DateFormatError { field, .. } => Some(field),
            _ => None,
        }
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
