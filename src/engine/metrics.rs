// ==========================================
// 仓间调拨建议系统 - 运行指标计算
// ==========================================
// 职责: 由评分与调拨建议汇总看板指标
// 输入: PressureScore 列表 + TransferRecommendation 列表
// 输出: RunMetrics
// ==========================================

use crate::domain::pressure::PressureScore;
use crate::domain::run::{CategoryRisk, RunMetrics};
use crate::domain::transfer::TransferRecommendation;
use std::collections::{BTreeMap, BTreeSet};

// ==========================================
// MetricsCalculator - 指标计算器
// ==========================================
pub struct MetricsCalculator {
    top_risk_limit: usize,
}

impl MetricsCalculator {
    /// # 参数
    /// - `top_risk_limit`: 风险品类榜单长度
    pub fn new(top_risk_limit: usize) -> Self {
        Self { top_risk_limit }
    }

    /// 计算运行指标
    ///
    /// 空输入返回全零指标 (不报错)
    pub fn calculate(
        &self,
        scores: &[PressureScore],
        recommendations: &[TransferRecommendation],
    ) -> RunMetrics {
        if scores.is_empty() {
            return RunMetrics::empty();
        }

        let total_skus = scores.len();
        let total_shortage_count = scores.iter().filter(|s| s.is_shortage()).count();
        let mean_spi = scores.iter().map(|s| s.spi).sum::<f64>() / total_skus as f64;
        let total_warehouses = scores
            .iter()
            .map(|s| s.warehouse_id.as_str())
            .collect::<BTreeSet<_>>()
            .len();

        let total_saving: f64 = recommendations.iter().map(|r| r.estimated_saving).sum();
        let total_transfer_units: u64 = recommendations.iter().map(|r| u64::from(r.units)).sum();

        let risks = self.rank_category_risk(scores);
        let top_risk_category = risks.first().map(|r| r.category.clone());

        RunMetrics {
            total_shortage_count,
            mean_spi,
            total_saving,
            top_risk_category,
            total_warehouses,
            total_skus,
            shortage_percentage: total_shortage_count as f64 / total_skus as f64 * 100.0,
            total_transfer_units,
            top_risk_categories: risks.into_iter().take(self.top_risk_limit).collect(),
        }
    }

    /// 品类风险排名: 品类内最小 SPI 升序, 同值按品类名
    fn rank_category_risk(&self, scores: &[PressureScore]) -> Vec<CategoryRisk> {
        let mut min_by_category: BTreeMap<&str, f64> = BTreeMap::new();
        for score in scores {
            min_by_category
                .entry(score.category.as_str())
                .and_modify(|m| *m = m.min(score.spi))
                .or_insert(score.spi);
        }

        let mut risks: Vec<CategoryRisk> = min_by_category
            .into_iter()
            .map(|(category, min_spi)| CategoryRisk {
                category: category.to_string(),
                min_spi,
            })
            .collect();
        risks.sort_by(|a, b| {
            a.min_spi
                .total_cmp(&b.min_spi)
                .then_with(|| a.category.cmp(&b.category))
        });
        risks
    }
}
