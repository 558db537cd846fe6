// ==========================================
// 仓间调拨建议系统 - 库存压力评分引擎
// ==========================================
// 职责: 计算每个 (仓库, 品类) 的库存压力指数 SPI
// 输入: 库存快照 + 需求预测表
// 输出: PressureScore 列表 + 数据质量告警
// ==========================================
// 公式: spi = current_stock_units - reorder_level - predicted_demand_units
// 红线: 负=缺货风险, 正=盈余, 0=平衡
// 红线: 评分阶段不做过滤, 只排除字段缺失/重复的记录
// ==========================================

use crate::domain::forecast::ForecastTable;
use crate::domain::pressure::PressureScore;
use crate::domain::run::DataQualityWarning;
use crate::domain::stock::{StockRecord, StockSnapshotRecord};
use crate::domain::types::WarningKind;
use crate::i18n::warning_message;
use std::collections::HashSet;
use tracing::{debug, warn};

// ==========================================
// ScoringOutcome - 评分结果
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ScoringOutcome {
    pub scores: Vec<PressureScore>,
    pub warnings: Vec<DataQualityWarning>,
}

// ==========================================
// PressureScorer - 库存压力评分引擎
// ==========================================
pub struct PressureScorer {
    // 无状态引擎
}

impl Default for PressureScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl PressureScorer {
    pub fn new() -> Self {
        Self {}
    }

    /// 单条库存记录评分
    ///
    /// 预测按 (仓库所在地, 品类) 查找; 无预测时需求按 0 处理,
    /// SPI 退化为 current_stock_units - reorder_level
    pub fn score(&self, record: &StockRecord, forecasts: &ForecastTable) -> PressureScore {
        let predicted =
            forecasts.predicted_units(&record.warehouse.location, &record.category);
        let spi = f64::from(record.current_stock_units)
            - f64::from(record.reorder_level)
            - predicted;

        PressureScore {
            warehouse_id: record.warehouse.warehouse_id.clone(),
            location: record.warehouse.location.clone(),
            category: record.category.clone(),
            current_stock_units: record.current_stock_units,
            reorder_level: record.reorder_level,
            predicted_demand_units: predicted,
            storage_cost_per_unit: record.storage_cost_per_unit,
            spi,
        }
    }

    /// 全量评分
    ///
    /// # 排除规则 (均以告警返回, 不中断)
    /// - 库存数量或再订货点缺失 → 排除
    /// - (仓库, 品类) 重复 → 保留首条, 排除后续
    /// - 仓储成本非有限/为负 → 钳制为 0 后参与评分
    pub fn score_all(
        &self,
        snapshot: &[StockSnapshotRecord],
        forecasts: &ForecastTable,
    ) -> ScoringOutcome {
        let mut outcome = ScoringOutcome::default();
        let mut seen: HashSet<(String, String)> = HashSet::new();

        for row in snapshot {
            let Some(mut record) = row.to_stock_record() else {
                let missing = row.missing_fields().join(",");
                warn!(
                    warehouse_id = %row.warehouse_id,
                    category = %row.category,
                    missing = %missing,
                    "库存记录字段缺失, 不参与评分"
                );
                outcome.warnings.push(DataQualityWarning {
                    kind: WarningKind::MissingStockField,
                    warehouse_id: row.warehouse_id.clone(),
                    category: row.category.clone(),
                    message: warning_message(
                        WarningKind::MissingStockField,
                        &[("fields", &missing)],
                    ),
                });
                continue;
            };

            if !seen.insert((row.warehouse_id.clone(), row.category.clone())) {
                warn!(
                    warehouse_id = %row.warehouse_id,
                    category = %row.category,
                    "库存记录重复, 保留首条"
                );
                outcome.warnings.push(DataQualityWarning {
                    kind: WarningKind::DuplicateStockRecord,
                    warehouse_id: row.warehouse_id.clone(),
                    category: row.category.clone(),
                    message: warning_message(WarningKind::DuplicateStockRecord, &[]),
                });
                continue;
            }

            let cost = record.storage_cost_per_unit;
            if !cost.is_finite() || cost < 0.0 {
                warn!(
                    warehouse_id = %row.warehouse_id,
                    category = %row.category,
                    cost,
                    "仓储成本异常, 钳制为 0"
                );
                outcome.warnings.push(DataQualityWarning {
                    kind: WarningKind::InvalidStorageCost,
                    warehouse_id: row.warehouse_id.clone(),
                    category: row.category.clone(),
                    message: warning_message(
                        WarningKind::InvalidStorageCost,
                        &[("value", &cost.to_string())],
                    ),
                });
                record.storage_cost_per_unit = 0.0;
            }

            outcome.scores.push(self.score(&record, forecasts));
        }

        debug!(
            scored = outcome.scores.len(),
            warnings = outcome.warnings.len(),
            "库存压力评分完成"
        );
        outcome
    }
}
