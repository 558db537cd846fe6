// ==========================================
// 仓间调拨建议系统 - 数据质量校验器实现
// ==========================================
// 职责: 行级 DQ 校验 + 通过校验的行转为领域记录
// ==========================================
// 库存行:
//   ERROR   仓库ID/所在地/品类缺失; 库存或再订货点为负、非整数、越界
//   WARNING 库存或再订货点缺失 (保留为缺失, 由评分阶段排除)
//   WARNING 仓储成本缺失/为负/非有限 (原值透传, 由评分阶段钳制)
// 订单行:
//   ERROR   日期/发货地/品类/金额缺失; 金额为负或非有限
//   WARNING 订单号缺失 (以行号代替)
// ==========================================

use crate::domain::dq::{DqLevel, DqViolation};
use crate::domain::order::OrderRecord;
use crate::domain::stock::StockSnapshotRecord;
use crate::importer::field_mapper::{fields, RawOrderRow, RawStockRow};
use crate::importer::importer_trait::RecordValidator;

pub struct DqValidator;

impl DqValidator {
    fn violation(
        row_number: usize,
        record_key: Option<&String>,
        level: DqLevel,
        field: &str,
        message: String,
    ) -> DqViolation {
        DqViolation {
            row_number,
            record_key: record_key.cloned(),
            level,
            field: field.to_string(),
            message,
        }
    }

    /// 校验非负整数数量字段
    fn check_units(
        row_number: usize,
        key: Option<&String>,
        field: &str,
        value: Option<f64>,
        violations: &mut Vec<DqViolation>,
    ) {
        match value {
            None => violations.push(Self::violation(
                row_number,
                key,
                DqLevel::Warning,
                field,
                "字段缺失, 该记录不参与评分".to_string(),
            )),
            Some(v) if !v.is_finite() || v < 0.0 => violations.push(Self::violation(
                row_number,
                key,
                DqLevel::Error,
                field,
                format!("数量不能为负: {}", v),
            )),
            Some(v) if v.fract() != 0.0 || v > f64::from(u32::MAX) => {
                violations.push(Self::violation(
                    row_number,
                    key,
                    DqLevel::Error,
                    field,
                    format!("数量必须为整数件: {}", v),
                ))
            }
            Some(_) => {}
        }
    }

    /// 转为库存快照行 (调用方须确保无 ERROR 违规)
    pub fn to_snapshot(raw: &RawStockRow) -> Option<StockSnapshotRecord> {
        Some(StockSnapshotRecord {
            warehouse_id: raw.warehouse_id.clone()?,
            location: raw.location.clone()?,
            category: raw.category.clone()?,
            current_stock_units: raw.current_stock_units.map(|v| v as u32),
            reorder_level: raw.reorder_level.map(|v| v as u32),
            storage_cost_per_unit: raw.storage_cost_per_unit.unwrap_or(f64::NAN),
        })
    }

    /// 转为订单记录 (调用方须确保无 ERROR 违规)
    pub fn to_order(raw: &RawOrderRow) -> Option<OrderRecord> {
        let order_id = raw
            .order_id
            .clone()
            .unwrap_or_else(|| format!("ROW-{}", raw.row_number));
        Some(OrderRecord {
            order_id,
            order_date: raw.order_date?,
            origin_location: raw.origin_location.clone()?,
            category: raw.category.clone()?,
            order_value: raw.order_value?,
        })
    }
}

impl RecordValidator<RawStockRow> for DqValidator {
    fn validate(&self, record: &RawStockRow, row_number: usize) -> Vec<DqViolation> {
        let mut violations = Vec::new();
        let key = record.warehouse_id.as_ref();

        // 标识字段
        for (field, value) in [
            (fields::WAREHOUSE_ID, &record.warehouse_id),
            (fields::LOCATION, &record.location),
            (fields::CATEGORY, &record.category),
        ] {
            if value.is_none() {
                violations.push(Self::violation(
                    row_number,
                    key,
                    DqLevel::Error,
                    field,
                    "标识字段缺失".to_string(),
                ));
            }
        }

        // 数量字段
        Self::check_units(
            row_number,
            key,
            fields::CURRENT_STOCK_UNITS,
            record.current_stock_units,
            &mut violations,
        );
        Self::check_units(
            row_number,
            key,
            fields::REORDER_LEVEL,
            record.reorder_level,
            &mut violations,
        );

        // 仓储成本
        match record.storage_cost_per_unit {
            None => violations.push(Self::violation(
                row_number,
                key,
                DqLevel::Warning,
                fields::STORAGE_COST_PER_UNIT,
                "仓储成本缺失, 评分时按 0 处理".to_string(),
            )),
            Some(c) if !c.is_finite() || c < 0.0 => violations.push(Self::violation(
                row_number,
                key,
                DqLevel::Warning,
                fields::STORAGE_COST_PER_UNIT,
                format!("仓储成本异常: {}, 评分时按 0 处理", c),
            )),
            Some(_) => {}
        }

        violations
    }
}

impl RecordValidator<RawOrderRow> for DqValidator {
    fn validate(&self, record: &RawOrderRow, row_number: usize) -> Vec<DqViolation> {
        let mut violations = Vec::new();
        let key = record.order_id.as_ref();

        if record.order_id.is_none() {
            violations.push(Self::violation(
                row_number,
                None,
                DqLevel::Warning,
                fields::ORDER_ID,
                format!("订单号缺失, 以 ROW-{} 代替", row_number),
            ));
        }
        if record.order_date.is_none() {
            violations.push(Self::violation(
                row_number,
                key,
                DqLevel::Error,
                fields::ORDER_DATE,
                "订单日期缺失".to_string(),
            ));
        }
        for (field, value) in [
            (fields::ORIGIN_LOCATION, &record.origin_location),
            (fields::CATEGORY, &record.category),
        ] {
            if value.is_none() {
                violations.push(Self::violation(
                    row_number,
                    key,
                    DqLevel::Error,
                    field,
                    "标识字段缺失".to_string(),
                ));
            }
        }
        match record.order_value {
            None => violations.push(Self::violation(
                row_number,
                key,
                DqLevel::Error,
                fields::ORDER_VALUE,
                "订单金额缺失".to_string(),
            )),
            Some(v) if !v.is_finite() || v < 0.0 => violations.push(Self::violation(
                row_number,
                key,
                DqLevel::Error,
                fields::ORDER_VALUE,
                format!("订单金额不能为负: {}", v),
            )),
            Some(_) => {}
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn stock_row() -> RawStockRow {
        RawStockRow {
            row_number: 2,
            warehouse_id: Some("W001".to_string()),
            location: Some("Mumbai".to_string()),
            category: Some("Electronics".to_string()),
            current_stock_units: Some(100.0),
            reorder_level: Some(40.0),
            storage_cost_per_unit: Some(8.0),
        }
    }

    fn order_row() -> RawOrderRow {
        RawOrderRow {
            row_number: 2,
            order_id: Some("O1".to_string()),
            order_date: NaiveDate::from_ymd_opt(2024, 1, 15),
            origin_location: Some("Mumbai".to_string()),
            category: Some("Electronics".to_string()),
            order_value: Some(2500.0),
        }
    }

    #[test]
    fn test_clean_stock_row() {
        let raw = stock_row();
        assert!(DqValidator.validate(&raw, 2).is_empty());
        let snapshot = DqValidator::to_snapshot(&raw).unwrap();
        assert_eq!(snapshot.current_stock_units, Some(100));
        assert_eq!(snapshot.storage_cost_per_unit, 8.0);
    }

    #[test]
    fn test_negative_stock_is_error() {
        let mut raw = stock_row();
        raw.current_stock_units = Some(-5.0);
        let violations = DqValidator.validate(&raw, 2);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].level, DqLevel::Error);
        assert_eq!(violations[0].field, fields::CURRENT_STOCK_UNITS);
    }

    #[test]
    fn test_fractional_reorder_is_error() {
        let mut raw = stock_row();
        raw.reorder_level = Some(2.5);
        let violations = DqValidator.validate(&raw, 2);
        assert_eq!(violations[0].level, DqLevel::Error);
    }

    #[test]
    fn test_missing_stock_is_warning_and_kept() {
        let mut raw = stock_row();
        raw.reorder_level = None;
        let violations = DqValidator.validate(&raw, 2);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].level, DqLevel::Warning);
        let snapshot = DqValidator::to_snapshot(&raw).unwrap();
        assert_eq!(snapshot.reorder_level, None);
    }

    #[test]
    fn test_missing_cost_passes_through_as_nan() {
        let mut raw = stock_row();
        raw.storage_cost_per_unit = None;
        let violations = DqValidator.validate(&raw, 2);
        assert_eq!(violations[0].level, DqLevel::Warning);
        assert!(DqValidator::to_snapshot(&raw)
            .unwrap()
            .storage_cost_per_unit
            .is_nan());
    }

    #[test]
    fn test_order_rules() {
        let raw = order_row();
        assert!(DqValidator.validate(&raw, 2).is_empty());

        let mut no_id = order_row();
        no_id.order_id = None;
        no_id.row_number = 9;
        let violations = DqValidator.validate(&no_id, 9);
        assert_eq!(violations[0].level, DqLevel::Warning);
        assert_eq!(DqValidator::to_order(&no_id).unwrap().order_id, "ROW-9");

        let mut negative = order_row();
        negative.order_value = Some(-1.0);
        let violations = DqValidator.validate(&negative, 2);
        assert_eq!(violations[0].level, DqLevel::Error);
    }
}
