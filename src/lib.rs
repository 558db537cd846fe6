// ==========================================
// 仓间调拨建议系统 - 核心库
// ==========================================
// 技术栈: Rust + CSV + JSON
// 系统定位: 决策支持系统 (只给建议, 不执行调拨)
// 主流程: 导入 → 需求预测 → 压力评分 → 调拨匹配 → 指标 → 导出
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 业务规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 导出层 - 结果输出
pub mod export;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{PressureSide, Priority, WarningKind};

// 领域实体
pub use domain::{
    DemandForecast, ForecastTable, NamedScenario, OrderRecord, PressureScore, RunMetrics,
    RunResult, ScenarioComparisonRow, ScenarioDelta, ScenarioParameters, ScenarioResult,
    StockRecord, StockSnapshotRecord, TransferRecommendation, Warehouse,
};

// 引擎
pub use engine::{
    DemandForecaster, EngineError, MetricsCalculator, PressureScorer, RunPipeline,
    ScenarioSimulator, TransferOptimizer,
};

// 配置
pub use config::{ConfigManager, EngineConfig};

// 导入导出
pub use export::ResultExporter;
pub use importer::DatasetImporter;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "仓间调拨建议系统";
