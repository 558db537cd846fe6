// ==========================================
// 仓间调拨建议系统 - 调拨匹配引擎
// ==========================================
// 职责: 同品类内盈余方与缺口方贪心匹配, 生成调拨建议
// 输入: 全量 PressureScore + 调拨配置
// 输出: 有序的 TransferRecommendation 列表
// ==========================================
// 红线: 调出量不超过调出方正 SPI, 调入量不超过调入方负 SPI 的绝对值
// 容差: 件数取 floor(x + ε), 距整数不足 ε 的值按该整数计, 上述红线在 ε 内成立
// 红线: 只在同品类内匹配, 不产生自调拨
// 注: 贪心启发式, 非全局最优; 最优解需建模为运输问题线性规划
// ==========================================

use crate::config::{SavingModel, TransferConfig};
use crate::domain::pressure::PressureScore;
use crate::domain::transfer::TransferRecommendation;
use crate::domain::types::Priority;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

// ==========================================
// 匹配池条目 (工作副本, 不修改原评分)
// ==========================================
#[derive(Debug)]
struct PoolSlot<'a> {
    score: &'a PressureScore,
    remaining: f64, // 剩余盈余 / 剩余缺口 (均为正数)
}

// ==========================================
// 匹配记录 (排序前)
// ==========================================
#[derive(Debug)]
struct MatchRecord {
    seq: usize,
    recommendation: TransferRecommendation,
}

// ==========================================
// TransferOptimizer - 调拨匹配引擎
// ==========================================
pub struct TransferOptimizer {
    // 无状态引擎
}

impl Default for TransferOptimizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TransferOptimizer {
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 生成调拨建议
    ///
    /// # 排序
    /// 1) 调入方原始缺口降序
    /// 2) 品类名升序
    /// 3) 匹配顺序
    #[instrument(skip_all, fields(scores = scores.len()))]
    pub fn optimize(
        &self,
        scores: &[PressureScore],
        config: &TransferConfig,
    ) -> Vec<TransferRecommendation> {
        // 按品类分组 (BTreeMap 保证品类遍历顺序稳定)
        let mut by_category: BTreeMap<&str, Vec<&PressureScore>> = BTreeMap::new();
        for score in scores {
            by_category.entry(score.category.as_str()).or_default().push(score);
        }

        let mut matches = Vec::new();
        for (category, group) in by_category {
            let before = matches.len();
            self.match_category(&group, config, &mut matches);
            debug!(
                category,
                members = group.len(),
                transfers = matches.len() - before,
                "品类匹配完成"
            );
        }

        matches.sort_by(|a, b| {
            b.recommendation
                .recipient_deficit()
                .total_cmp(&a.recommendation.recipient_deficit())
                .then_with(|| a.recommendation.category.cmp(&b.recommendation.category))
                .then_with(|| a.seq.cmp(&b.seq))
        });

        matches.into_iter().map(|m| m.recommendation).collect()
    }

    /// 单品类贪心匹配
    ///
    /// 每轮取剩余缺口最大的调入方, 与剩余盈余最大的调出方匹配,
    /// units = floor(min(盈余, 缺口)); 不足 1 件的一方出池
    fn match_category(
        &self,
        group: &[&PressureScore],
        config: &TransferConfig,
        out: &mut Vec<MatchRecord>,
    ) {
        let eps = config.epsilon;

        // 只保留至少有 1 个整件可调的条目
        let mut donors: Vec<PoolSlot> = group
            .iter()
            .filter(|s| s.spi > 0.0)
            .map(|s| PoolSlot { score: *s, remaining: s.spi })
            .filter(|slot| whole_units(slot.remaining, eps) > 0)
            .collect();
        let mut recipients: Vec<PoolSlot> = group
            .iter()
            .filter(|s| s.spi < 0.0)
            .map(|s| PoolSlot { score: *s, remaining: -s.spi })
            .filter(|slot| whole_units(slot.remaining, eps) > 0)
            .collect();

        // 初始顺序: 盈余降序 / 缺口降序 (即 SPI 升序), 同值按仓库ID
        donors.sort_by(compare_slots);
        recipients.sort_by(compare_slots);

        while !donors.is_empty() && !recipients.is_empty() {
            let r_idx = pick_largest(&recipients);
            let recipient_score = recipients[r_idx].score;

            let candidate = if config.suppress_zero_saving {
                pick_largest_where(&donors, |d| {
                    unit_saving(d.score, recipient_score, config.saving_model) > 0.0
                })
            } else {
                pick_largest_where(&donors, |_| true)
            };

            let Some(d_idx) = candidate else {
                // 无可产生正节省的调出方, 该调入方出池
                debug!(
                    warehouse_id = %recipient_score.warehouse_id,
                    category = %recipient_score.category,
                    "无正节省调出方, 跳过该缺口"
                );
                recipients.remove(r_idx);
                continue;
            };

            let donor_score = donors[d_idx].score;
            if donor_score.warehouse_id == recipient_score.warehouse_id {
                // 同品类同仓库不可能同时为正负, 仅在输入重复时出现
                recipients.remove(r_idx);
                continue;
            }

            let available = donors[d_idx].remaining.min(recipients[r_idx].remaining);
            let units = whole_units(available, eps);
            if units == 0 {
                // 池内不变量保证不会出现, 防止死循环
                recipients.remove(r_idx);
                continue;
            }

            let saving = transfer_saving(units, donor_score, recipient_score, config.saving_model);
            out.push(MatchRecord {
                seq: out.len(),
                recommendation: TransferRecommendation {
                    category: recipient_score.category.clone(),
                    from_warehouse: donor_score.warehouse_id.clone(),
                    from_location: donor_score.location.clone(),
                    to_warehouse: recipient_score.warehouse_id.clone(),
                    to_location: recipient_score.location.clone(),
                    units,
                    estimated_saving: saving,
                    priority: assign_priority(-recipient_score.spi, config),
                    donor_spi: donor_score.spi,
                    recipient_spi: recipient_score.spi,
                },
            });

            donors[d_idx].remaining -= f64::from(units);
            recipients[r_idx].remaining -= f64::from(units);

            if whole_units(donors[d_idx].remaining, eps) == 0 {
                donors.remove(d_idx);
            }
            if whole_units(recipients[r_idx].remaining, eps) == 0 {
                recipients.remove(r_idx);
            }
        }
    }
}

// ==========================================
// 计算辅助函数
// ==========================================

/// 可调整件数 (截断, 容差内向上取整)
fn whole_units(amount: f64, eps: f64) -> u32 {
    if !amount.is_finite() || amount + eps < 1.0 {
        return 0;
    }
    let units = (amount + eps).floor();
    if units >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        units as u32
    }
}

/// 单位成本差 (未钳制)
fn unit_saving(donor: &PressureScore, recipient: &PressureScore, model: SavingModel) -> f64 {
    match model {
        SavingModel::DonorRelief => donor.storage_cost_per_unit - recipient.storage_cost_per_unit,
        SavingModel::RecipientAvoidance => {
            recipient.storage_cost_per_unit - donor.storage_cost_per_unit
        }
    }
}

/// 调拨节省: units × max(0, 单位成本差); 非有限值钳制为 0
pub fn transfer_saving(
    units: u32,
    donor: &PressureScore,
    recipient: &PressureScore,
    model: SavingModel,
) -> f64 {
    let per_unit = unit_saving(donor, recipient, model);
    let saving = f64::from(units) * per_unit.max(0.0);
    if saving.is_finite() && saving > 0.0 {
        saving
    } else {
        0.0
    }
}

/// 按调入方缺口大小分级
pub fn assign_priority(deficit: f64, config: &TransferConfig) -> Priority {
    if deficit >= config.high_priority_deficit {
        Priority::High
    } else if deficit >= config.medium_priority_deficit {
        Priority::Medium
    } else {
        Priority::Low
    }
}

/// 剩余量降序, 同值按仓库ID升序
fn compare_slots(a: &PoolSlot, b: &PoolSlot) -> Ordering {
    b.remaining
        .total_cmp(&a.remaining)
        .then_with(|| a.score.warehouse_id.cmp(&b.score.warehouse_id))
}

fn pick_largest(pool: &[PoolSlot]) -> usize {
    pick_largest_where(pool, |_| true).unwrap_or(0)
}

fn pick_largest_where<F>(pool: &[PoolSlot], eligible: F) -> Option<usize>
where
    F: Fn(&PoolSlot) -> bool,
{
    let mut best: Option<usize> = None;
    for (idx, slot) in pool.iter().enumerate() {
        if !eligible(slot) {
            continue;
        }
        best = match best {
            None => Some(idx),
            Some(current) if compare_slots(slot, &pool[current]) == Ordering::Less => Some(idx),
            keep => keep,
        };
    }
    best
}
