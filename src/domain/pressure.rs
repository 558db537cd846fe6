// ==========================================
// 仓间调拨建议系统 - 库存压力指数 (SPI) 领域模型
// ==========================================
// 公式: spi = current_stock_units - reorder_level - predicted_demand_units
// 红线: 负=缺货风险, 正=盈余, 0=平衡; 下游不得反转
// ==========================================

use crate::domain::types::PressureSide;
use serde::{Deserialize, Serialize};

// ==========================================
// PressureScore - 库存压力评分
// ==========================================
// 派生数据,每次运行重算,不原地修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PressureScore {
    pub warehouse_id: String,
    pub location: String,
    pub category: String,

    // ===== 计算输入 =====
    pub current_stock_units: u32,
    pub reorder_level: u32,
    pub predicted_demand_units: f64,
    pub storage_cost_per_unit: f64,

    // ===== 计算结果 =====
    pub spi: f64,
}

impl PressureScore {
    /// 压力方向
    pub fn side(&self) -> PressureSide {
        PressureSide::from_spi(self.spi)
    }

    pub fn is_shortage(&self) -> bool {
        self.spi < 0.0
    }

    pub fn is_surplus(&self) -> bool {
        self.spi > 0.0
    }
}
