// ==========================================
// 仓间调拨建议系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含文件读写逻辑,不含引擎逻辑
// ==========================================

pub mod dq;
pub mod forecast;
pub mod order;
pub mod pressure;
pub mod run;
pub mod scenario;
pub mod stock;
pub mod transfer;
pub mod types;

// 重导出核心类型
pub use dq::{DqLevel, DqReport, DqSummary, DqViolation};
pub use forecast::{DemandForecast, ForecastTable};
pub use order::OrderRecord;
pub use pressure::PressureScore;
pub use run::{CategoryRisk, DataQualityWarning, RunMetrics, RunResult};
pub use scenario::{
    NamedScenario, ScenarioComparisonRow, ScenarioDelta, ScenarioParameters, ScenarioResult,
};
pub use stock::{StockRecord, StockSnapshotRecord, Warehouse};
pub use transfer::TransferRecommendation;
pub use types::{PressureSide, Priority, WarningKind};
