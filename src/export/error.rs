// ==========================================
// 仓间调拨建议系统 - 导出模块错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("文件写入失败 ({path}): {message}")]
    FileWriteError { path: String, message: String },

    #[error("CSV 导出失败: {0}")]
    CsvWriteError(#[from] csv::Error),

    #[error("JSON 序列化失败: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("输出失败: {0}")]
    Io(#[from] std::io::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;
