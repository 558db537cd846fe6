// ==========================================
// 仓间调拨建议系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 数据问题 (缺字段/成本异常) 不走错误通道, 以告警形式返回
// ==========================================

use crate::config::ConfigError;
use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 情景参数越界或非有限值 (用户输入, 不做静默钳制)
    #[error("情景参数越界: {parameter}={value}, 允许范围 [{min}, {max}]")]
    ScenarioParameterOutOfRange {
        parameter: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("配置无效: {0}")]
    InvalidConfig(#[from] ConfigError),
}

impl EngineError {
    /// 出错的参数/配置名
    pub fn parameter(&self) -> Option<&str> {
        match self {
            EngineError::ScenarioParameterOutOfRange { parameter, .. } => Some(parameter),
            EngineError::InvalidConfig(ConfigError::InvalidValue { key, .. }) => Some(key),
            EngineError::InvalidConfig(_) => None,
        }
    }
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
