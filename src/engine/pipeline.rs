// ==========================================
// 仓间调拨建议系统 - 引擎编排器
// ==========================================
// 用途: 协调 预测 → 评分 → 调拨匹配 → 指标 的执行顺序
// 红线: 纯函数, 不持有跨调用状态; 每次调用都是全新计算
// ==========================================

use crate::config::EngineConfig;
use crate::domain::forecast::ForecastTable;
use crate::domain::order::OrderRecord;
use crate::domain::run::RunResult;
use crate::domain::stock::StockSnapshotRecord;
use crate::engine::{DemandForecaster, MetricsCalculator, PressureScorer, TransferOptimizer};
use std::collections::BTreeSet;
use tracing::{debug, info};

// ==========================================
// RunPipeline - 流水线编排器
// ==========================================
pub struct RunPipeline {
    forecaster: DemandForecaster,
    scorer: PressureScorer,
    optimizer: TransferOptimizer,
}

impl Default for RunPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl RunPipeline {
    pub fn new() -> Self {
        Self {
            forecaster: DemandForecaster::new(),
            scorer: PressureScorer::new(),
            optimizer: TransferOptimizer::new(),
        }
    }

    /// 已知仓库所在地 (订单发货地须在其中才参与预测)
    pub fn known_locations(stock: &[StockSnapshotRecord]) -> BTreeSet<String> {
        stock.iter().map(|r| r.location.clone()).collect()
    }

    /// 需求预测
    pub fn forecast(
        &self,
        stock: &[StockSnapshotRecord],
        orders: &[OrderRecord],
        config: &EngineConfig,
    ) -> ForecastTable {
        self.forecaster
            .forecast(orders, &Self::known_locations(stock), &config.forecast)
    }

    /// 执行完整流水线
    ///
    /// # 参数
    /// - stock: 库存快照
    /// - orders: 订单日志
    /// - config: 引擎配置
    ///
    /// # 返回
    /// 运行结果; 空输入返回空但合法的结果
    pub fn run(
        &self,
        stock: &[StockSnapshotRecord],
        orders: &[OrderRecord],
        config: &EngineConfig,
    ) -> RunResult {
        info!(
            stock_rows = stock.len(),
            orders = orders.len(),
            "开始执行调拨分析流程"
        );

        // ==========================================
        // 步骤1: 需求预测
        // ==========================================
        debug!("步骤1: 需求预测");
        let forecasts = self.forecast(stock, orders, config);

        self.run_with_forecasts(stock, &forecasts, config)
    }

    /// 基于已有预测执行 评分 → 匹配 → 指标
    ///
    /// 情景模拟在缩放后的预测上复用此入口
    pub fn run_with_forecasts(
        &self,
        stock: &[StockSnapshotRecord],
        forecasts: &ForecastTable,
        config: &EngineConfig,
    ) -> RunResult {
        // ==========================================
        // 步骤2: 库存压力评分
        // ==========================================
        debug!(forecast_pairs = forecasts.len(), "步骤2: 库存压力评分");
        let outcome = self.scorer.score_all(stock, forecasts);

        // ==========================================
        // 步骤3: 调拨匹配
        // ==========================================
        debug!(scores = outcome.scores.len(), "步骤3: 调拨匹配");
        let recommendations = self.optimizer.optimize(&outcome.scores, &config.transfer);

        // ==========================================
        // 步骤4: 指标汇总
        // ==========================================
        let metrics =
            MetricsCalculator::new(config.top_risk_limit).calculate(&outcome.scores, &recommendations);

        info!(
            scores = outcome.scores.len(),
            recommendations = recommendations.len(),
            shortages = metrics.total_shortage_count,
            total_saving = metrics.total_saving,
            warnings = outcome.warnings.len(),
            "调拨分析流程完成"
        );

        RunResult {
            scores: outcome.scores,
            recommendations,
            metrics,
            warnings: outcome.warnings,
        }
    }
}
