// ==========================================
// 仓间调拨建议系统 - 引擎配置对象
// ==========================================
// 职责: 流水线每次调用显式传入的不可变配置
// 红线: 不使用进程级可变全局状态
// ==========================================

use crate::config::error::ConfigError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 周期粒度 (Period Granularity)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PeriodGranularity {
    Day,   // 自然日
    Week,  // ISO 周
    Month, // 自然月
}

impl fmt::Display for PeriodGranularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodGranularity::Day => write!(f, "DAY"),
            PeriodGranularity::Week => write!(f, "WEEK"),
            PeriodGranularity::Month => write!(f, "MONTH"),
        }
    }
}

impl FromStr for PeriodGranularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DAY" => Ok(PeriodGranularity::Day),
            "WEEK" => Ok(PeriodGranularity::Week),
            "MONTH" => Ok(PeriodGranularity::Month),
            other => Err(format!("未知周期粒度: {}", other)),
        }
    }
}

// ==========================================
// 需求折算口径 (Demand Basis)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DemandBasis {
    OrderValue, // 订单金额 / value_per_unit
    OrderCount, // 每张订单计 1 件
}

impl fmt::Display for DemandBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DemandBasis::OrderValue => write!(f, "ORDER_VALUE"),
            DemandBasis::OrderCount => write!(f, "ORDER_COUNT"),
        }
    }
}

impl FromStr for DemandBasis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ORDER_VALUE" => Ok(DemandBasis::OrderValue),
            "ORDER_COUNT" => Ok(DemandBasis::OrderCount),
            other => Err(format!("未知需求口径: {}", other)),
        }
    }
}

// ==========================================
// 节省计算口径 (Saving Model)
// ==========================================
// DonorRelief:        units × max(0, 调出方成本 - 调入方成本)
// RecipientAvoidance: units × max(0, 调入方成本 - 调出方成本)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SavingModel {
    DonorRelief,
    RecipientAvoidance,
}

impl fmt::Display for SavingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SavingModel::DonorRelief => write!(f, "DONOR_RELIEF"),
            SavingModel::RecipientAvoidance => write!(f, "RECIPIENT_AVOIDANCE"),
        }
    }
}

impl FromStr for SavingModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DONOR_RELIEF" => Ok(SavingModel::DonorRelief),
            "RECIPIENT_AVOIDANCE" => Ok(SavingModel::RecipientAvoidance),
            other => Err(format!("未知节省口径: {}", other)),
        }
    }
}

// ==========================================
// ForecastConfig - 需求预测配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// 滚动窗口周期数 N
    pub window_periods: u32,
    pub granularity: PeriodGranularity,
    pub basis: DemandBasis,
    /// 每件商品对应的订单金额 (仅 OrderValue 口径使用)
    pub value_per_unit: f64,
    /// 预测基准日; 为空时取订单日志中的最新日期
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            window_periods: 3,
            granularity: PeriodGranularity::Month,
            basis: DemandBasis::OrderValue,
            value_per_unit: 1000.0,
            as_of: None,
        }
    }
}

// ==========================================
// TransferConfig - 调拨匹配配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferConfig {
    /// 浮点容差
    pub epsilon: f64,
    /// 是否抑制节省为 0 的调拨
    pub suppress_zero_saving: bool,
    pub saving_model: SavingModel,
    /// 调入方缺口 >= 该值为 High
    pub high_priority_deficit: f64,
    /// 调入方缺口 >= 该值为 Medium, 其余 Low
    pub medium_priority_deficit: f64,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            epsilon: 1e-6,
            suppress_zero_saving: false,
            // 按调入方成本计节省 (W1 成本 8 → W2 成本 12, 20 件得 80.0) 需改用 RecipientAvoidance
            saving_model: SavingModel::DonorRelief,
            high_priority_deficit: 50.0,
            medium_priority_deficit: 20.0,
        }
    }
}

// ==========================================
// ScenarioBounds - 情景参数边界 (百分比)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioBounds {
    pub demand_min_pct: f64,
    pub demand_max_pct: f64,
    pub storage_cost_min_pct: f64,
    pub storage_cost_max_pct: f64,
}

impl Default for ScenarioBounds {
    fn default() -> Self {
        Self {
            demand_min_pct: -50.0,
            demand_max_pct: 50.0,
            storage_cost_min_pct: -30.0,
            storage_cost_max_pct: 30.0,
        }
    }
}

// ==========================================
// EngineConfig - 引擎总配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub forecast: ForecastConfig,
    #[serde(default)]
    pub transfer: TransferConfig,
    #[serde(default)]
    pub scenario_bounds: ScenarioBounds,
    #[serde(default = "default_top_risk_limit")]
    pub top_risk_limit: usize,
}

fn default_top_risk_limit() -> usize {
    3
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            forecast: ForecastConfig::default(),
            transfer: TransferConfig::default(),
            scenario_bounds: ScenarioBounds::default(),
            top_risk_limit: default_top_risk_limit(),
        }
    }
}

impl EngineConfig {
    /// 校验配置的一致性
    ///
    /// # 校验规则
    /// 1. window_periods >= 1
    /// 2. value_per_unit 为正的有限值
    /// 3. epsilon 为非负有限值且 < 1
    /// 4. 0 <= medium_priority_deficit <= high_priority_deficit
    /// 5. 情景边界 min <= 0 <= max, 且 min > -100 (缩放系数不为负)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.forecast.window_periods == 0 {
            return Err(ConfigError::InvalidValue {
                key: "forecast.window_periods".to_string(),
                message: "窗口周期数必须 >= 1".to_string(),
            });
        }

        let vpu = self.forecast.value_per_unit;
        if !vpu.is_finite() || vpu <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "forecast.value_per_unit".to_string(),
                message: format!("单位金额必须为正数: {}", vpu),
            });
        }

        let eps = self.transfer.epsilon;
        if !eps.is_finite() || !(0.0..1.0).contains(&eps) {
            return Err(ConfigError::InvalidValue {
                key: "transfer.epsilon".to_string(),
                message: format!("容差必须在 [0, 1) 内: {}", eps),
            });
        }

        let high = self.transfer.high_priority_deficit;
        let medium = self.transfer.medium_priority_deficit;
        if !high.is_finite() || !medium.is_finite() || medium < 0.0 || medium > high {
            return Err(ConfigError::InvalidValue {
                key: "transfer.priority_thresholds".to_string(),
                message: format!("优先级阈值须满足 0 <= medium({}) <= high({})", medium, high),
            });
        }

        let b = &self.scenario_bounds;
        let pairs = [
            ("scenario.demand_bounds", b.demand_min_pct, b.demand_max_pct),
            (
                "scenario.storage_cost_bounds",
                b.storage_cost_min_pct,
                b.storage_cost_max_pct,
            ),
        ];
        for (key, min, max) in pairs {
            if !min.is_finite() || !max.is_finite() || min > 0.0 || max < 0.0 || min <= -100.0 {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("情景边界须满足 -100 < min({}) <= 0 <= max({})", min, max),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_saving_model_is_donor_relief() {
        // 按调入方成本计节省需显式切换
        assert_eq!(
            EngineConfig::default().transfer.saving_model,
            SavingModel::DonorRelief
        );
    }

    #[test]
    fn test_zero_window_rejected() {
        let mut config = EngineConfig::default();
        config.forecast.window_periods = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("forecast.window_periods"));
    }

    #[test]
    fn test_inverted_priority_thresholds_rejected() {
        let mut config = EngineConfig::default();
        config.transfer.high_priority_deficit = 10.0;
        config.transfer.medium_priority_deficit = 30.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("week".parse::<PeriodGranularity>().unwrap(), PeriodGranularity::Week);
        assert_eq!("ORDER_COUNT".parse::<DemandBasis>().unwrap(), DemandBasis::OrderCount);
        assert_eq!(
            "recipient_avoidance".parse::<SavingModel>().unwrap(),
            SavingModel::RecipientAvoidance
        );
        assert!("fortnight".parse::<PeriodGranularity>().is_err());
    }
}
