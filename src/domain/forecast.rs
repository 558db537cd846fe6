// ==========================================
// 仓间调拨建议系统 - 需求预测领域模型
// ==========================================
// 每次运行重新生成,不跨运行持久化
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// DemandForecast - 单个 (location, category) 的预测需求
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandForecast {
    pub location: String,
    pub category: String,
    pub predicted_demand_units: f64, // 非负实数
    pub periods_observed: u32,       // 窗口内有订单的周期数
}

// ==========================================
// ForecastTable - 预测结果表
// ==========================================
// 键: (location, category); BTreeMap 保证遍历顺序稳定
// 序列化为 DemandForecast 数组 (JSON 对象键只能是字符串)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<DemandForecast>", from = "Vec<DemandForecast>")]
pub struct ForecastTable {
    entries: BTreeMap<(String, String), DemandForecast>,
}

impl ForecastTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, forecast: DemandForecast) {
        self.entries.insert(
            (forecast.location.clone(), forecast.category.clone()),
            forecast,
        );
    }

    /// 查询预测
    pub fn get(&self, location: &str, category: &str) -> Option<&DemandForecast> {
        self.entries
            .get(&(location.to_string(), category.to_string()))
    }

    /// 查询预测需求量,无预测时为 0
    pub fn predicted_units(&self, location: &str, category: &str) -> f64 {
        self.get(location, category)
            .map(|f| f.predicted_demand_units)
            .unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DemandForecast> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 生成按比例缩放后的新表 (情景模拟用,不修改原表)
    pub fn scaled(&self, factor: f64) -> Self {
        let entries = self
            .entries
            .iter()
            .map(|(key, f)| {
                let mut scaled = f.clone();
                scaled.predicted_demand_units = f.predicted_demand_units * factor;
                (key.clone(), scaled)
            })
            .collect();
        Self { entries }
    }
}

impl FromIterator<DemandForecast> for ForecastTable {
    fn from_iter<I: IntoIterator<Item = DemandForecast>>(iter: I) -> Self {
        let mut table = Self::new();
        for forecast in iter {
            table.insert(forecast);
        }
        table
    }
}

impl From<Vec<DemandForecast>> for ForecastTable {
    fn from(forecasts: Vec<DemandForecast>) -> Self {
        forecasts.into_iter().collect()
    }
}

impl From<ForecastTable> for Vec<DemandForecast> {
    fn from(table: ForecastTable) -> Self {
        table.entries.into_values().collect()
    }
}
