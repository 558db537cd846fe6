// ==========================================
// 仓间调拨建议系统 - 运行结果领域模型
// ==========================================
// 对外契约: scores / recommendations / metrics 字段名稳定
// ==========================================

use crate::domain::pressure::PressureScore;
use crate::domain::transfer::TransferRecommendation;
use crate::domain::types::WarningKind;
use serde::{Deserialize, Serialize};

// ==========================================
// DataQualityWarning - 数据质量告警
// ==========================================
// 非致命: 仅说明哪条记录被排除/钳制及原因
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataQualityWarning {
    pub kind: WarningKind,
    pub warehouse_id: String,
    pub category: String,
    pub message: String,
}

// ==========================================
// CategoryRisk - 品类风险 (品类内最小 SPI)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRisk {
    pub category: String,
    pub min_spi: f64,
}

// ==========================================
// RunMetrics - 运行指标
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetrics {
    // ===== 核心指标 =====
    pub total_shortage_count: usize,       // spi < 0 的记录数
    pub mean_spi: f64,                     // 平均 SPI (无记录时为 0)
    pub total_saving: f64,                 // 调拨建议预估节省合计
    pub top_risk_category: Option<String>, // 最小 SPI 所在品类

    // ===== 看板扩展指标 =====
    pub total_warehouses: usize,
    pub total_skus: usize,                 // 参与评分的 (仓库, 品类) 数
    pub shortage_percentage: f64,          // 缺货占比 (%)
    pub total_transfer_units: u64,
    pub top_risk_categories: Vec<CategoryRisk>, // 风险最高的前 N 个品类
}

impl RunMetrics {
    /// 空输入对应的指标
    pub fn empty() -> Self {
        Self {
            total_shortage_count: 0,
            mean_spi: 0.0,
            total_saving: 0.0,
            top_risk_category: None,
            total_warehouses: 0,
            total_skus: 0,
            shortage_percentage: 0.0,
            total_transfer_units: 0,
            top_risk_categories: Vec::new(),
        }
    }
}

// ==========================================
// RunResult - 一次完整流水线运行的结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub scores: Vec<PressureScore>,
    pub recommendations: Vec<TransferRecommendation>,
    pub metrics: RunMetrics,
    #[serde(default)]
    pub warnings: Vec<DataQualityWarning>,
}
