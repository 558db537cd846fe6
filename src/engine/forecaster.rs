// ==========================================
// 仓间调拨建议系统 - 需求预测引擎
// ==========================================
// 职责: 按 (location, category) 计算滚动窗口平均需求
// 输入: 订单日志 + 已知仓库所在地 + 预测配置
// 输出: ForecastTable
// ==========================================
// 口径:
// - 仅统计 origin_location 匹配已知仓库所在地的订单 (其余排除,不报错)
// - 历史跨度: 最早订单周期 ~ 基准周期 (as_of 或最新订单)
// - 窗口: 最近 min(N, 跨度) 个周期, 窗口内无订单的周期按 0 计
// - 无历史的组合需求为 0
// ==========================================

use crate::config::{DemandBasis, ForecastConfig, PeriodGranularity};
use crate::domain::forecast::{DemandForecast, ForecastTable};
use crate::domain::order::OrderRecord;
use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, instrument};

// ==========================================
// DemandForecaster - 需求预测引擎
// ==========================================
pub struct DemandForecaster {
    // 无状态引擎,配置通过参数传入
}

impl Default for DemandForecaster {
    fn default() -> Self {
        Self::new()
    }
}

impl DemandForecaster {
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 生成全部 (location, category) 的需求预测
    ///
    /// # 参数
    /// - `orders`: 订单日志
    /// - `known_locations`: 已知仓库所在地
    /// - `config`: 预测配置
    ///
    /// # 返回
    /// 预测表; 窗口外才有订单的组合也会出现, 预测值为 0
    #[instrument(skip_all, fields(orders = orders.len(), window = config.window_periods))]
    pub fn forecast(
        &self,
        orders: &[OrderRecord],
        known_locations: &BTreeSet<String>,
        config: &ForecastConfig,
    ) -> ForecastTable {
        // 1. 过滤可纳入预测的订单
        let included: Vec<&OrderRecord> = orders
            .iter()
            .filter(|o| known_locations.contains(&o.origin_location))
            .filter(|o| o.order_value.is_finite() && o.order_value >= 0.0)
            .filter(|o| config.as_of.map_or(true, |as_of| o.order_date <= as_of))
            .collect();

        let excluded = orders.len() - included.len();
        if excluded > 0 {
            debug!(excluded, "部分订单未纳入预测 (发货地未匹配/金额异常/晚于基准日)");
        }

        // 2. 确定窗口
        let Some((window_start, window_end)) = self.resolve_window(&included, config) else {
            debug!("无可用订单历史, 预测表为空");
            return ForecastTable::new();
        };
        let window_len = (window_end - window_start + 1) as f64;

        // 3. 按组合聚合窗口内需求
        let mut totals: BTreeMap<(String, String), (f64, BTreeSet<i64>)> = BTreeMap::new();
        for order in &included {
            let key = (order.origin_location.clone(), order.category.clone());
            let entry = totals.entry(key).or_insert_with(|| (0.0, BTreeSet::new()));

            let period = period_index(order.order_date, config.granularity);
            if period < window_start || period > window_end {
                continue;
            }
            entry.0 += self.unit_equivalent(order, config);
            entry.1.insert(period);
        }

        // 4. 窗口平均
        let table: ForecastTable = totals
            .into_iter()
            .map(|((location, category), (total, periods))| DemandForecast {
                location,
                category,
                predicted_demand_units: total / window_len,
                periods_observed: periods.len() as u32,
            })
            .collect();

        debug!(pairs = table.len(), window_len, "需求预测完成");
        table
    }

    /// 单个 (location, category) 的预测需求
    ///
    /// 窗口与全量预测一致 (由整个订单日志决定), 无历史返回 0
    pub fn predict(
        &self,
        orders: &[OrderRecord],
        known_locations: &BTreeSet<String>,
        location: &str,
        category: &str,
        config: &ForecastConfig,
    ) -> f64 {
        self.forecast(orders, known_locations, config)
            .predicted_units(location, category)
    }

    // ==========================================
    // 内部方法
    // ==========================================

    /// 计算窗口 [start, end] (周期索引, 闭区间)
    fn resolve_window(
        &self,
        included: &[&OrderRecord],
        config: &ForecastConfig,
    ) -> Option<(i64, i64)> {
        let earliest = included.iter().map(|o| o.order_date).min()?;
        let latest = included.iter().map(|o| o.order_date).max()?;
        let reference = config.as_of.unwrap_or(latest);

        let first = period_index(earliest, config.granularity);
        let end = period_index(reference, config.granularity);
        let span = end - first + 1;
        let window_len = span.min(i64::from(config.window_periods.max(1)));

        Some((end - window_len + 1, end))
    }

    /// 订单折算为需求件数
    fn unit_equivalent(&self, order: &OrderRecord, config: &ForecastConfig) -> f64 {
        match config.basis {
            DemandBasis::OrderCount => 1.0,
            DemandBasis::OrderValue => {
                if config.value_per_unit > 0.0 {
                    order.order_value / config.value_per_unit
                } else {
                    0.0
                }
            }
        }
    }
}

/// 日期映射为连续的周期索引
pub fn period_index(date: NaiveDate, granularity: PeriodGranularity) -> i64 {
    match granularity {
        PeriodGranularity::Day => i64::from(date.num_days_from_ce()),
        PeriodGranularity::Week => {
            let monday = date.num_days_from_ce() - date.weekday().num_days_from_monday() as i32;
            i64::from(monday).div_euclid(7)
        }
        PeriodGranularity::Month => i64::from(date.year()) * 12 + i64::from(date.month0()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn order(id: &str, d: NaiveDate, origin: &str, category: &str, value: f64) -> OrderRecord {
        OrderRecord::new(id, d, origin, category, value)
    }

    fn locations(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn count_config(window: u32) -> ForecastConfig {
        ForecastConfig {
            window_periods: window,
            basis: DemandBasis::OrderCount,
            ..ForecastConfig::default()
        }
    }

    #[test]
    fn test_rolling_average_over_window() {
        // 1月 1 单, 2月 2 单, 3月 3 单; N=2 → (2+3)/2
        let orders = vec![
            order("O1", date(2024, 1, 5), "Mumbai", "Electronics", 100.0),
            order("O2", date(2024, 2, 5), "Mumbai", "Electronics", 100.0),
            order("O3", date(2024, 2, 6), "Mumbai", "Electronics", 100.0),
            order("O4", date(2024, 3, 5), "Mumbai", "Electronics", 100.0),
            order("O5", date(2024, 3, 6), "Mumbai", "Electronics", 100.0),
            order("O6", date(2024, 3, 7), "Mumbai", "Electronics", 100.0),
        ];
        let table = DemandForecaster::new().forecast(&orders, &locations(&["Mumbai"]), &count_config(2));
        let f = table.get("Mumbai", "Electronics").unwrap();
        assert!((f.predicted_demand_units - 2.5).abs() < 1e-9);
        assert_eq!(f.periods_observed, 2);
    }

    #[test]
    fn test_short_history_averages_available_periods() {
        // 只有 2 个月历史, N=6 → 按 2 个周期平均
        let orders = vec![
            order("O1", date(2024, 1, 5), "Mumbai", "Electronics", 100.0),
            order("O2", date(2024, 2, 5), "Mumbai", "Electronics", 100.0),
            order("O3", date(2024, 2, 9), "Mumbai", "Electronics", 100.0),
        ];
        let units = DemandForecaster::new().predict(
            &orders,
            &locations(&["Mumbai"]),
            "Mumbai",
            "Electronics",
            &count_config(6),
        );
        assert!((units - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_periods_inside_window_count_as_zero() {
        // Delhi 只在 1 月有单, 窗口为 2~3 月 → 0
        let orders = vec![
            order("O1", date(2024, 1, 5), "Delhi", "Clothing", 100.0),
            order("O2", date(2024, 3, 5), "Mumbai", "Electronics", 100.0),
        ];
        let table = DemandForecaster::new().forecast(
            &orders,
            &locations(&["Mumbai", "Delhi"]),
            &count_config(2),
        );
        assert_eq!(table.predicted_units("Delhi", "Clothing"), 0.0);
        assert!((table.predicted_units("Mumbai", "Electronics") - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_unmatched_origin_excluded() {
        let orders = vec![
            order("O1", date(2024, 1, 5), "Chennai", "Electronics", 5000.0),
            order("O2", date(2024, 1, 6), "Mumbai", "Electronics", 5000.0),
        ];
        let table = DemandForecaster::new().forecast(
            &orders,
            &locations(&["Mumbai"]),
            &ForecastConfig::default(),
        );
        assert!(table.get("Chennai", "Electronics").is_none());
        assert!((table.predicted_units("Mumbai", "Electronics") - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_history_is_zero_not_error() {
        let table = DemandForecaster::new().forecast(
            &[],
            &locations(&["Mumbai"]),
            &ForecastConfig::default(),
        );
        assert!(table.is_empty());
        assert_eq!(table.predicted_units("Mumbai", "Electronics"), 0.0);
    }

    #[test]
    fn test_order_value_basis() {
        let orders = vec![
            order("O1", date(2024, 1, 15), "Mumbai", "Electronics", 15000.0),
            order("O2", date(2024, 1, 17), "Mumbai", "Electronics", 22000.0),
        ];
        let config = ForecastConfig {
            value_per_unit: 1000.0,
            ..ForecastConfig::default()
        };
        let units = DemandForecaster::new().predict(
            &orders,
            &locations(&["Mumbai"]),
            "Mumbai",
            "Electronics",
            &config,
        );
        assert!((units - 37.0).abs() < 1e-9);
    }

    #[test]
    fn test_as_of_excludes_later_orders() {
        let orders = vec![
            order("O1", date(2024, 1, 15), "Mumbai", "Electronics", 100.0),
            order("O2", date(2024, 5, 15), "Mumbai", "Electronics", 100.0),
        ];
        let config = ForecastConfig {
            window_periods: 1,
            basis: DemandBasis::OrderCount,
            as_of: Some(date(2024, 1, 31)),
            ..ForecastConfig::default()
        };
        let units = DemandForecaster::new().predict(
            &orders,
            &locations(&["Mumbai"]),
            "Mumbai",
            "Electronics",
            &config,
        );
        assert!((units - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_period_index_is_contiguous() {
        assert_eq!(
            period_index(date(2024, 1, 31), PeriodGranularity::Month) + 1,
            period_index(date(2024, 2, 1), PeriodGranularity::Month)
        );
        assert_eq!(
            period_index(date(2023, 12, 31), PeriodGranularity::Month) + 1,
            period_index(date(2024, 1, 1), PeriodGranularity::Month)
        );
        // 2024-01-01 为周一; 2024-01-07 周日同周
        assert_eq!(
            period_index(date(2024, 1, 1), PeriodGranularity::Week),
            period_index(date(2024, 1, 7), PeriodGranularity::Week)
        );
        assert_eq!(
            period_index(date(2024, 1, 7), PeriodGranularity::Week) + 1,
            period_index(date(2024, 1, 8), PeriodGranularity::Week)
        );
    }
}
