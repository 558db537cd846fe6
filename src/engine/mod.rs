// ==========================================
// 仓间调拨建议系统 - 引擎层
// ==========================================
// 职责: 需求预测 / 压力评分 / 调拨匹配 / 情景模拟
// 红线: 引擎不做文件读写, 所有输入输出均为内存中的类型化记录
// 红线: 无随机性, 同输入同输出
// ==========================================

pub mod error;
pub mod forecaster;
pub mod metrics;
pub mod pipeline;
pub mod pressure;
pub mod scenario;
pub mod transfer;

// 重导出核心引擎
pub use error::{EngineError, EngineResult};
pub use forecaster::DemandForecaster;
pub use metrics::MetricsCalculator;
pub use pipeline::RunPipeline;
pub use pressure::{PressureScorer, ScoringOutcome};
pub use scenario::{compute_delta, ScenarioSimulator};
pub use transfer::TransferOptimizer;
