// ==========================================
// 仓间调拨建议系统 - 导出层
// ==========================================
// 职责: 将评分/调拨建议/情景对比写为 CSV, 运行结果写为 JSON
// ==========================================

pub mod csv_exporter;
pub mod error;

pub use csv_exporter::{
    ResultExporter, COMPARISON_COLUMNS, RECOMMENDATION_COLUMNS, RECOMMENDATIONS_FILE,
    RUN_JSON_FILE, SCORE_COLUMNS, SCORES_FILE,
};
pub use error::{ExportError, ExportResult};
