// ==========================================
// 仓间调拨建议系统 - 情景模拟领域模型
// ==========================================
// 参数单位: 百分比 (20.0 表示 +20%)
// ==========================================

use crate::domain::run::RunResult;
use serde::{Deserialize, Serialize};

// ==========================================
// ScenarioParameters - 情景参数
// ==========================================
// 只作为模拟输入,越界由模拟器拒绝,不做静默钳制
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScenarioParameters {
    pub demand_change_pct: f64,
    pub storage_cost_change_pct: f64,
}

impl ScenarioParameters {
    pub fn new(demand_change_pct: f64, storage_cost_change_pct: f64) -> Self {
        Self {
            demand_change_pct,
            storage_cost_change_pct,
        }
    }

    /// 中性情景 {0%, 0%}
    pub fn neutral() -> Self {
        Self::default()
    }

    /// 需求缩放系数 (1 + pct/100)
    pub fn demand_factor(&self) -> f64 {
        1.0 + self.demand_change_pct / 100.0
    }

    /// 仓储成本缩放系数 (1 + pct/100)
    pub fn storage_cost_factor(&self) -> f64 {
        1.0 + self.storage_cost_change_pct / 100.0
    }
}

// ==========================================
// ScenarioDelta - 情景相对基线的变化
// ==========================================
// 口径: 情景值 - 基线值
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDelta {
    pub shortage_delta: i64,
    pub mean_spi_delta: f64,
    pub recommendation_count_delta: i64,
    pub saving_delta: f64,
}

// ==========================================
// ScenarioResult - 情景模拟结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub parameters: ScenarioParameters,
    pub scaled_run: RunResult,
    pub delta: ScenarioDelta,
}

// ==========================================
// NamedScenario - 预设情景
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedScenario {
    pub name: String,
    pub parameters: ScenarioParameters,
}

impl NamedScenario {
    pub fn new(name: &str, demand_change_pct: f64, storage_cost_change_pct: f64) -> Self {
        Self {
            name: name.to_string(),
            parameters: ScenarioParameters::new(demand_change_pct, storage_cost_change_pct),
        }
    }

    /// 最佳情景: 需求 -20%, 成本 -10%
    pub fn best_case() -> Self {
        Self::new("Best Case", -20.0, -10.0)
    }

    /// 最差情景: 需求 +30%, 成本 +15%
    pub fn worst_case() -> Self {
        Self::new("Worst Case", 30.0, 15.0)
    }
}

// ==========================================
// ScenarioComparisonRow - 情景对比表行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparisonRow {
    pub scenario: String,
    pub demand_change_pct: f64,
    pub storage_cost_change_pct: f64,
    pub shortage_percentage: f64,
    pub mean_spi: f64,
    pub total_saving: f64,
    pub recommendation_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factors() {
        let params = ScenarioParameters::new(20.0, -10.0);
        assert!((params.demand_factor() - 1.2).abs() < 1e-12);
        assert!((params.storage_cost_factor() - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_neutral_factor_is_exactly_one() {
        let params = ScenarioParameters::neutral();
        assert_eq!(params.demand_factor(), 1.0);
        assert_eq!(params.storage_cost_factor(), 1.0);
    }
}
