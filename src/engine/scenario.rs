// ==========================================
// 仓间调拨建议系统 - 情景模拟引擎
// ==========================================
// 职责: 在扰动后的需求/仓储成本上重跑流水线, 输出相对基线的变化
// 输入: 库存快照 + 订单日志(或预测表) + 情景参数 + 引擎配置
// 输出: ScenarioResult / 情景对比表
// ==========================================
// 红线: 参数越界直接拒绝, 不做静默钳制
// 红线: 不修改基线数据, 只在复制品上缩放
// 红线: 无随机性, 同输入同输出
// ==========================================

use crate::config::{EngineConfig, ScenarioBounds};
use crate::domain::forecast::ForecastTable;
use crate::domain::order::OrderRecord;
use crate::domain::run::RunResult;
use crate::domain::scenario::{
    NamedScenario, ScenarioComparisonRow, ScenarioDelta, ScenarioParameters, ScenarioResult,
};
use crate::domain::stock::StockSnapshotRecord;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::pipeline::RunPipeline;
use rayon::prelude::*;
use tracing::{info, instrument};

// ==========================================
// ScenarioSimulator - 情景模拟引擎
// ==========================================
pub struct ScenarioSimulator {
    pipeline: RunPipeline,
}

impl Default for ScenarioSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioSimulator {
    pub fn new() -> Self {
        Self {
            pipeline: RunPipeline::new(),
        }
    }

    // ==========================================
    // 参数校验
    // ==========================================

    /// 校验情景参数
    ///
    /// # 返回
    /// - Ok(()): 参数在边界内
    /// - Err: ScenarioParameterOutOfRange, 指明出错参数
    pub fn validate_parameters(
        params: &ScenarioParameters,
        bounds: &ScenarioBounds,
    ) -> EngineResult<()> {
        let checks = [
            (
                "demand_change_pct",
                params.demand_change_pct,
                bounds.demand_min_pct,
                bounds.demand_max_pct,
            ),
            (
                "storage_cost_change_pct",
                params.storage_cost_change_pct,
                bounds.storage_cost_min_pct,
                bounds.storage_cost_max_pct,
            ),
        ];

        for (parameter, value, min, max) in checks {
            if !value.is_finite() || value < min || value > max {
                return Err(EngineError::ScenarioParameterOutOfRange {
                    parameter: parameter.to_string(),
                    value,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 单情景模拟 (从订单日志开始)
    pub fn simulate(
        &self,
        stock: &[StockSnapshotRecord],
        orders: &[OrderRecord],
        params: &ScenarioParameters,
        config: &EngineConfig,
    ) -> EngineResult<ScenarioResult> {
        config.validate()?;
        Self::validate_parameters(params, &config.scenario_bounds)?;

        let forecasts = self.pipeline.forecast(stock, orders, config);
        self.simulate_with_forecasts(stock, &forecasts, params, config)
    }

    /// 单情景模拟 (基于已有预测表)
    #[instrument(skip_all, fields(
        demand_change_pct = params.demand_change_pct,
        storage_cost_change_pct = params.storage_cost_change_pct
    ))]
    pub fn simulate_with_forecasts(
        &self,
        stock: &[StockSnapshotRecord],
        forecasts: &ForecastTable,
        params: &ScenarioParameters,
        config: &EngineConfig,
    ) -> EngineResult<ScenarioResult> {
        config.validate()?;
        Self::validate_parameters(params, &config.scenario_bounds)?;

        let baseline = self.pipeline.run_with_forecasts(stock, forecasts, config);
        let scaled_run = self.run_scaled(stock, forecasts, params, config);
        let delta = compute_delta(&baseline, &scaled_run);

        info!(
            shortage_delta = delta.shortage_delta,
            mean_spi_delta = delta.mean_spi_delta,
            recommendation_count_delta = delta.recommendation_count_delta,
            saving_delta = delta.saving_delta,
            "情景模拟完成"
        );

        Ok(ScenarioResult {
            parameters: *params,
            scaled_run,
            delta,
        })
    }

    /// 多情景对比 (并行计算, 输出顺序与输入一致)
    ///
    /// 任一情景参数越界即整体拒绝, 不返回部分结果
    pub fn compare(
        &self,
        stock: &[StockSnapshotRecord],
        orders: &[OrderRecord],
        scenarios: &[NamedScenario],
        config: &EngineConfig,
    ) -> EngineResult<Vec<ScenarioComparisonRow>> {
        config.validate()?;
        for scenario in scenarios {
            Self::validate_parameters(&scenario.parameters, &config.scenario_bounds)?;
        }

        let forecasts = self.pipeline.forecast(stock, orders, config);

        let rows: Vec<ScenarioComparisonRow> = scenarios
            .par_iter()
            .map(|scenario| {
                let run = self.run_scaled(stock, &forecasts, &scenario.parameters, config);
                ScenarioComparisonRow {
                    scenario: scenario.name.clone(),
                    demand_change_pct: scenario.parameters.demand_change_pct,
                    storage_cost_change_pct: scenario.parameters.storage_cost_change_pct,
                    shortage_percentage: run.metrics.shortage_percentage,
                    mean_spi: run.metrics.mean_spi,
                    total_saving: run.metrics.total_saving,
                    recommendation_count: run.recommendations.len(),
                }
            })
            .collect();

        Ok(rows)
    }

    /// 预设情景: 最佳 / 最差 / 当前
    pub fn preset_scenarios(current: ScenarioParameters) -> Vec<NamedScenario> {
        vec![
            NamedScenario::best_case(),
            NamedScenario::worst_case(),
            NamedScenario {
                name: "Current".to_string(),
                parameters: current,
            },
        ]
    }

    // ==========================================
    // 内部方法
    // ==========================================

    /// 在缩放后的复制品上运行流水线
    fn run_scaled(
        &self,
        stock: &[StockSnapshotRecord],
        forecasts: &ForecastTable,
        params: &ScenarioParameters,
        config: &EngineConfig,
    ) -> RunResult {
        let scaled_forecasts = forecasts.scaled(params.demand_factor());
        let scaled_stock = scale_storage_cost(stock, params.storage_cost_factor());
        self.pipeline
            .run_with_forecasts(&scaled_stock, &scaled_forecasts, config)
    }
}

/// 仓储成本缩放 (返回新快照)
fn scale_storage_cost(stock: &[StockSnapshotRecord], factor: f64) -> Vec<StockSnapshotRecord> {
    stock
        .iter()
        .map(|row| {
            let mut scaled = row.clone();
            scaled.storage_cost_per_unit = row.storage_cost_per_unit * factor;
            scaled
        })
        .collect()
}

/// 情景相对基线的变化 (情景 - 基线)
pub fn compute_delta(baseline: &RunResult, scenario: &RunResult) -> ScenarioDelta {
    ScenarioDelta {
        shortage_delta: scenario.metrics.total_shortage_count as i64
            - baseline.metrics.total_shortage_count as i64,
        mean_spi_delta: scenario.metrics.mean_spi - baseline.metrics.mean_spi,
        recommendation_count_delta: scenario.recommendations.len() as i64
            - baseline.recommendations.len() as i64,
        saving_delta: scenario.metrics.total_saving - baseline.metrics.total_saving,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_inclusive() {
        let bounds = ScenarioBounds::default();
        assert!(ScenarioSimulator::validate_parameters(
            &ScenarioParameters::new(50.0, -30.0),
            &bounds
        )
        .is_ok());
    }

    #[test]
    fn test_out_of_range_names_parameter() {
        let bounds = ScenarioBounds::default();
        let err = ScenarioSimulator::validate_parameters(
            &ScenarioParameters::new(10.0, 45.0),
            &bounds,
        )
        .unwrap_err();
        assert_eq!(err.parameter(), Some("storage_cost_change_pct"));

        let err = ScenarioSimulator::validate_parameters(
            &ScenarioParameters::new(f64::NAN, 0.0),
            &bounds,
        )
        .unwrap_err();
        assert_eq!(err.parameter(), Some("demand_change_pct"));
    }

    #[test]
    fn test_scale_storage_cost_copies() {
        let stock = vec![StockSnapshotRecord::new("W1", "Mumbai", "Toys", 10, 5, 10.0)];
        let scaled = scale_storage_cost(&stock, 1.1);
        assert_eq!(stock[0].storage_cost_per_unit, 10.0);
        assert!((scaled[0].storage_cost_per_unit - 11.0).abs() < 1e-9);
    }
}
