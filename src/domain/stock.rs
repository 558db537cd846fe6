// ==========================================
// 仓间调拨建议系统 - 库存领域模型
// ==========================================
// 唯一性: 每个 (warehouse_id, category) 至多一条 StockRecord
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Warehouse - 仓库 (只读参考数据)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Warehouse {
    pub warehouse_id: String, // 仓库ID
    pub location: String,     // 所在地 (与订单 origin_location 对齐)
}

// ==========================================
// StockSnapshotRecord - 库存快照行 (导入口径)
// ==========================================
// 用途: 导入层交付的原始行,库存数量/再订货点允许缺失
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSnapshotRecord {
    pub warehouse_id: String,
    pub location: String,
    pub category: String,
    pub current_stock_units: Option<u32>,
    pub reorder_level: Option<u32>,
    pub storage_cost_per_unit: f64,
}

impl StockSnapshotRecord {
    /// 构造字段完整的快照行
    pub fn new(
        warehouse_id: &str,
        location: &str,
        category: &str,
        current_stock_units: u32,
        reorder_level: u32,
        storage_cost_per_unit: f64,
    ) -> Self {
        Self {
            warehouse_id: warehouse_id.to_string(),
            location: location.to_string(),
            category: category.to_string(),
            current_stock_units: Some(current_stock_units),
            reorder_level: Some(reorder_level),
            storage_cost_per_unit,
        }
    }

    /// 转为完整的 StockRecord
    ///
    /// # 返回
    /// - Some: 库存数量与再订货点均存在
    /// - None: 任一字段缺失 (记录应被排除,而不是按 0 处理)
    pub fn to_stock_record(&self) -> Option<StockRecord> {
        Some(StockRecord {
            warehouse: Warehouse {
                warehouse_id: self.warehouse_id.clone(),
                location: self.location.clone(),
            },
            category: self.category.clone(),
            current_stock_units: self.current_stock_units?,
            reorder_level: self.reorder_level?,
            storage_cost_per_unit: self.storage_cost_per_unit,
        })
    }

    /// 缺失的字段名列表
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.current_stock_units.is_none() {
            fields.push("current_stock_units");
        }
        if self.reorder_level.is_none() {
            fields.push("reorder_level");
        }
        fields
    }
}

// ==========================================
// StockRecord - 库存记录 (引擎口径)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    pub warehouse: Warehouse,
    pub category: String,
    pub current_stock_units: u32,    // 当前库存 (>=0)
    pub reorder_level: u32,          // 再订货点 (>=0)
    pub storage_cost_per_unit: f64,  // 单位仓储成本 (>=0)
}

impl StockRecord {
    /// 唯一键 (warehouse_id, category)
    pub fn key(&self) -> (&str, &str) {
        (self.warehouse.warehouse_id.as_str(), self.category.as_str())
    }
}
