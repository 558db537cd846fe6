// ==========================================
// 仓间调拨建议系统 - 领域类型定义
// ==========================================
// 红线: SPI 符号约定 负=缺货风险, 正=盈余, 0=平衡
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 调拨优先级 (Transfer Priority)
// ==========================================
// 顺序: High < Medium < Low (High 排在最前)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    High,   // 高
    Medium, // 中
    Low,    // 低
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "HIGH"),
            Priority::Medium => write!(f, "MEDIUM"),
            Priority::Low => write!(f, "LOW"),
        }
    }
}

// ==========================================
// 压力方向 (Pressure Side)
// ==========================================
// 由 SPI 符号派生,不单独存储
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PressureSide {
    Shortage, // 缺货风险 (spi < 0)
    Balanced, // 平衡 (spi == 0)
    Surplus,  // 盈余 (spi > 0)
}

impl PressureSide {
    /// 按 SPI 符号判定压力方向
    pub fn from_spi(spi: f64) -> Self {
        if spi < 0.0 {
            PressureSide::Shortage
        } else if spi > 0.0 {
            PressureSide::Surplus
        } else {
            PressureSide::Balanced
        }
    }
}

impl fmt::Display for PressureSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PressureSide::Shortage => write!(f, "SHORTAGE"),
            PressureSide::Balanced => write!(f, "BALANCED"),
            PressureSide::Surplus => write!(f, "SURPLUS"),
        }
    }
}

// ==========================================
// 数据质量告警类型 (Data Quality Warning Kind)
// ==========================================
// 告警不阻断计算,仅排除对应记录或钳制数值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningKind {
    MissingStockField,     // 库存/再订货点缺失,记录被排除
    DuplicateStockRecord,  // (仓库, 品类) 重复,后出现的记录被排除
    InvalidStorageCost,    // 仓储成本非有限或为负,钳制为 0
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningKind::MissingStockField => write!(f, "MISSING_STOCK_FIELD"),
            WarningKind::DuplicateStockRecord => write!(f, "DUPLICATE_STOCK_RECORD"),
            WarningKind::InvalidStorageCost => write!(f, "INVALID_STORAGE_COST"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        assert!(Priority::High < Priority::Medium);
        assert!(Priority::Medium < Priority::Low);
    }

    #[test]
    fn test_pressure_side_from_spi() {
        assert_eq!(PressureSide::from_spi(-0.5), PressureSide::Shortage);
        assert_eq!(PressureSide::from_spi(0.0), PressureSide::Balanced);
        assert_eq!(PressureSide::from_spi(12.0), PressureSide::Surplus);
    }

    #[test]
    fn test_priority_serde_format() {
        let json = serde_json::to_string(&Priority::Medium).unwrap();
        assert_eq!(json, "\"MEDIUM\"");
    }
}
