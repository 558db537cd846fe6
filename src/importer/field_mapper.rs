// ==========================================
// 仓间调拨建议系统 - 字段映射器实现
// ==========================================
// 职责: 源字段 → 标准字段映射 + 类型转换
// 库存表: Warehouse_ID, Location, Product_Category,
//         Current_Stock_Units, Reorder_Level, Storage_Cost_per_Unit
// 订单表: Order_ID, Order_Date, Origin, Product_Category, Order_Value_INR
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use chrono::NaiveDate;
use std::collections::HashMap;

// ===== 标准字段名 =====
pub mod fields {
    pub const WAREHOUSE_ID: &str = "warehouse_id";
    pub const LOCATION: &str = "location";
    pub const CATEGORY: &str = "category";
    pub const CURRENT_STOCK_UNITS: &str = "current_stock_units";
    pub const REORDER_LEVEL: &str = "reorder_level";
    pub const STORAGE_COST_PER_UNIT: &str = "storage_cost_per_unit";

    pub const ORDER_ID: &str = "order_id";
    pub const ORDER_DATE: &str = "order_date";
    pub const ORIGIN_LOCATION: &str = "origin_location";
    pub const ORDER_VALUE: &str = "order_value";
}

/// 库存表必需列 (标准字段名)
pub const STOCK_REQUIRED: &[&str] = &[
    fields::WAREHOUSE_ID,
    fields::LOCATION,
    fields::CATEGORY,
    fields::CURRENT_STOCK_UNITS,
    fields::REORDER_LEVEL,
    fields::STORAGE_COST_PER_UNIT,
];

/// 订单表必需列 (标准字段名)
pub const ORDER_REQUIRED: &[&str] = &[
    fields::ORDER_ID,
    fields::ORDER_DATE,
    fields::ORIGIN_LOCATION,
    fields::CATEGORY,
    fields::ORDER_VALUE,
];

// ==========================================
// RawStockRow - 库存行 (映射后, 校验前)
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct RawStockRow {
    pub row_number: usize,
    pub warehouse_id: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub current_stock_units: Option<f64>,
    pub reorder_level: Option<f64>,
    pub storage_cost_per_unit: Option<f64>,
}

// ==========================================
// RawOrderRow - 订单行 (映射后, 校验前)
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct RawOrderRow {
    pub row_number: usize,
    pub order_id: Option<String>,
    pub order_date: Option<NaiveDate>,
    pub origin_location: Option<String>,
    pub category: Option<String>,
    pub order_value: Option<f64>,
}

pub struct FieldMapper;

impl FieldMapper {
    /// 标准字段的候选列名 (按优先级)
    pub fn aliases(key: &str) -> &'static [&'static str] {
        match key {
            fields::WAREHOUSE_ID => &["Warehouse_ID", "warehouse_id", "仓库ID"],
            fields::LOCATION => &["Location", "location", "所在地"],
            fields::CATEGORY => &["Product_Category", "Category", "category", "品类"],
            fields::CURRENT_STOCK_UNITS => {
                &["Current_Stock_Units", "current_stock_units", "Stock_Units", "库存数量"]
            }
            fields::REORDER_LEVEL => &["Reorder_Level", "reorder_level", "再订货点"],
            fields::STORAGE_COST_PER_UNIT => &[
                "Storage_Cost_per_Unit",
                "Storage_Cost_Per_Unit",
                "storage_cost_per_unit",
                "单位仓储成本",
            ],
            fields::ORDER_ID => &["Order_ID", "order_id", "订单号"],
            fields::ORDER_DATE => &["Order_Date", "order_date", "订单日期"],
            fields::ORIGIN_LOCATION => &["Origin", "origin_location", "Origin_Location", "发货地"],
            fields::ORDER_VALUE => &["Order_Value_INR", "Order_Value", "order_value", "订单金额"],
            _ => &[],
        }
    }

    /// 表头是否包含某标准字段 (任一别名)
    pub fn has_column(headers: &[String], key: &str) -> bool {
        Self::aliases(key)
            .iter()
            .any(|alias| headers.iter().any(|h| h == alias))
    }

    /// 缺失的必需列
    pub fn missing_columns(headers: &[String], required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|key| !Self::has_column(headers, key))
            .map(|key| key.to_string())
            .collect()
    }

    /// 映射库存行
    pub fn map_stock_row(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<RawStockRow> {
        Ok(RawStockRow {
            row_number,
            warehouse_id: self.get_string(row, fields::WAREHOUSE_ID),
            location: self.get_string(row, fields::LOCATION),
            category: self.get_string(row, fields::CATEGORY),
            current_stock_units: self.parse_f64(row, fields::CURRENT_STOCK_UNITS, row_number)?,
            reorder_level: self.parse_f64(row, fields::REORDER_LEVEL, row_number)?,
            storage_cost_per_unit: self.parse_f64(
                row,
                fields::STORAGE_COST_PER_UNIT,
                row_number,
            )?,
        })
    }

    /// 映射订单行
    pub fn map_order_row(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<RawOrderRow> {
        Ok(RawOrderRow {
            row_number,
            order_id: self.get_string(row, fields::ORDER_ID),
            order_date: self.parse_date(row, fields::ORDER_DATE, row_number)?,
            origin_location: self.get_string(row, fields::ORIGIN_LOCATION),
            category: self.get_string(row, fields::CATEGORY),
            order_value: self.parse_f64(row, fields::ORDER_VALUE, row_number)?,
        })
    }

    /// 提取字符串字段, 依次尝试别名, 空串视为缺失
    fn get_string(&self, row: &HashMap<String, String>, key: &str) -> Option<String> {
        Self::aliases(key)
            .iter()
            .filter_map(|alias| row.get(*alias))
            .map(|v| v.trim())
            .find(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// 解析浮点数 (容忍千分位逗号)
    fn parse_f64(
        &self,
        row: &HashMap<String, String>,
        key: &str,
        row_number: usize,
    ) -> ImportResult<Option<f64>> {
        match self.get_string(row, key) {
            None => Ok(None),
            Some(value) => value
                .replace(',', "")
                .parse::<f64>()
                .map(Some)
                .map_err(|_| ImportError::TypeConversionError {
                    row: row_number,
                    field: key.to_string(),
                    message: format!("无法解析为数值: {}", value),
                }),
        }
    }

    /// 解析日期 (YYYY-MM-DD / YYYY/MM/DD / YYYYMMDD)
    fn parse_date(
        &self,
        row: &HashMap<String, String>,
        key: &str,
        row_number: usize,
    ) -> ImportResult<Option<NaiveDate>> {
        match self.get_string(row, key) {
            None => Ok(None),
            Some(value) => ["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"]
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(&value, fmt).ok())
                .map(Some)
                .ok_or(ImportError::DateFormatError {
                    row: row_number,
                    field: key.to_string(),
                    value,
                }),
        }
    }
}
