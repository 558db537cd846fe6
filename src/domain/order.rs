// ==========================================
// 仓间调拨建议系统 - 订单领域模型
// ==========================================
// 订单为只追加的历史日志,不可变
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// OrderRecord - 历史订单
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_id: String,
    pub order_date: NaiveDate,
    pub origin_location: String, // 发货地 (须匹配已知仓库所在地才参与预测)
    pub category: String,
    pub order_value: f64,        // 订单金额 (>=0)
}

impl OrderRecord {
    pub fn new(
        order_id: &str,
        order_date: NaiveDate,
        origin_location: &str,
        category: &str,
        order_value: f64,
    ) -> Self {
        Self {
            order_id: order_id.to_string(),
            order_date,
            origin_location: origin_location.to_string(),
            category: category.to_string(),
            order_value,
        }
    }
}
