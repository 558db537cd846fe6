// ==========================================
// 仓间调拨建议系统 - 配置层
// ==========================================
// 职责: 系统配置管理, 生成显式传入流水线的不可变配置对象
// 存储: 扁平 key-value JSON 文件
// ==========================================

pub mod config_manager;
pub mod engine_config;
pub mod error;

// 重导出核心配置类型
pub use config_manager::{config_keys, default_config_path, ConfigManager, CONFIG_PATH_ENV};
pub use engine_config::{
    DemandBasis, EngineConfig, ForecastConfig, PeriodGranularity, SavingModel, ScenarioBounds,
    TransferConfig,
};
pub use error::{ConfigError, ConfigResult};
