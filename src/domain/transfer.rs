// ==========================================
// 仓间调拨建议系统 - 调拨建议领域模型
// ==========================================
// 输出对象,生成后不可变
// ==========================================

use crate::domain::types::Priority;
use serde::{Deserialize, Serialize};

// ==========================================
// TransferRecommendation - 调拨建议
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRecommendation {
    pub category: String,
    pub from_warehouse: String,
    pub from_location: String,
    pub to_warehouse: String,
    pub to_location: String,
    pub units: u32,              // 调拨数量 (>0)
    pub estimated_saving: f64,   // 预估节省 (>=0)
    pub priority: Priority,

    // ===== 可解释性 =====
    pub donor_spi: f64,          // 调出方原始 SPI
    pub recipient_spi: f64,      // 调入方原始 SPI
}

impl TransferRecommendation {
    /// 调入方原始缺口 (正数)
    pub fn recipient_deficit(&self) -> f64 {
        -self.recipient_spi
    }
}
