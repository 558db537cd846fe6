// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::NaiveDate;
use stock_transfer_advisor::config::{EngineConfig, SavingModel};
use stock_transfer_advisor::domain::forecast::{DemandForecast, ForecastTable};
use stock_transfer_advisor::domain::order::OrderRecord;
use stock_transfer_advisor::domain::stock::StockSnapshotRecord;

// ==========================================
// StockSnapshotRecord 构建器
// ==========================================

pub struct StockBuilder {
    warehouse_id: String,
    location: String,
    category: String,
    current_stock_units: Option<u32>,
    reorder_level: Option<u32>,
    storage_cost_per_unit: f64,
}

impl StockBuilder {
    pub fn new(warehouse_id: &str, location: &str) -> Self {
        Self {
            warehouse_id: warehouse_id.to_string(),
            location: location.to_string(),
            category: "Electronics".to_string(),
            current_stock_units: Some(0),
            reorder_level: Some(0),
            storage_cost_per_unit: 0.0,
        }
    }

    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    pub fn stock(mut self, units: u32) -> Self {
        self.current_stock_units = Some(units);
        self
    }

    pub fn reorder(mut self, level: u32) -> Self {
        self.reorder_level = Some(level);
        self
    }

    pub fn cost(mut self, cost: f64) -> Self {
        self.storage_cost_per_unit = cost;
        self
    }

    pub fn missing_stock(mut self) -> Self {
        self.current_stock_units = None;
        self
    }

    pub fn build(self) -> StockSnapshotRecord {
        StockSnapshotRecord {
            warehouse_id: self.warehouse_id,
            location: self.location,
            category: self.category,
            current_stock_units: self.current_stock_units,
            reorder_level: self.reorder_level,
            storage_cost_per_unit: self.storage_cost_per_unit,
        }
    }
}

// ==========================================
// 订单 / 预测 辅助函数
// ==========================================

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// 连续 months 个月, 每月 15 日一单, 金额相同
pub fn monthly_orders(
    prefix: &str,
    origin: &str,
    category: &str,
    value_per_month: f64,
    months: u32,
) -> Vec<OrderRecord> {
    (1..=months)
        .map(|m| {
            OrderRecord::new(
                &format!("{}-{:02}", prefix, m),
                date(2024, m, 15),
                origin,
                category,
                value_per_month,
            )
        })
        .collect()
}

/// 直接构造预测表
pub fn forecast_table(entries: &[(&str, &str, f64)]) -> ForecastTable {
    entries
        .iter()
        .map(|(location, category, units)| DemandForecast {
            location: location.to_string(),
            category: category.to_string(),
            predicted_demand_units: *units,
            periods_observed: 3,
        })
        .collect()
}

// ==========================================
// 标准场景: W1 盈余 +20 (成本 8), W2 缺口 -30 (成本 12)
// ==========================================

pub fn electronics_pair() -> (Vec<StockSnapshotRecord>, ForecastTable) {
    let stock = vec![
        StockBuilder::new("W1", "Mumbai").stock(100).reorder(60).cost(8.0).build(),
        StockBuilder::new("W2", "Delhi").stock(30).reorder(50).cost(12.0).build(),
    ];
    let forecasts = forecast_table(&[("Mumbai", "Electronics", 20.0), ("Delhi", "Electronics", 10.0)]);
    (stock, forecasts)
}

/// 与标准场景对应的订单日志 (1-3 月, 每 1000 金额折 1 件)
pub fn electronics_pair_orders() -> Vec<OrderRecord> {
    let mut orders = monthly_orders("M", "Mumbai", "Electronics", 20_000.0, 3);
    orders.extend(monthly_orders("D", "Delhi", "Electronics", 10_000.0, 3));
    orders
}

pub fn config_with_model(model: SavingModel) -> EngineConfig {
    let mut config = EngineConfig::default();
    config.transfer.saving_model = model;
    config
}
