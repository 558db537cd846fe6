// ==========================================
// 仓间调拨建议系统 - 配置层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 配置层错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    FileReadError { path: String, message: String },

    #[error("配置文件格式错误: {0}")]
    ParseError(String),

    #[error("配置值非法 (key: {key}): {message}")]
    InvalidValue { key: String, message: String },
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
