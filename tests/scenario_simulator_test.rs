// ==========================================
// ScenarioSimulator 集成测试
// ==========================================
// 测试目标: 需求/仓储成本扰动后的重算与差异汇总
// 覆盖范围: 中性情景 / 需求上浮 / 成本扰动 / 越界拒绝 / 多情景对比
// ==========================================

mod helpers;

use helpers::test_data_builder::*;
use stock_transfer_advisor::config::{EngineConfig, SavingModel};
use stock_transfer_advisor::domain::scenario::{NamedScenario, ScenarioParameters};
use stock_transfer_advisor::engine::{EngineError, RunPipeline, ScenarioSimulator};

// ==========================================
// 测试用例 1: 中性情景复现基线
// ==========================================

#[test]
fn test_neutral_scenario_reproduces_baseline() {
    println!("\n=== 测试：中性情景 {{0%, 0%}} ===");

    let (stock, forecasts) = electronics_pair();
    let config = config_with_model(SavingModel::RecipientAvoidance);

    let baseline = RunPipeline::new().run_with_forecasts(&stock, &forecasts, &config);
    let result = ScenarioSimulator::new()
        .simulate_with_forecasts(&stock, &forecasts, &ScenarioParameters::neutral(), &config)
        .unwrap();

    assert_eq!(result.scaled_run, baseline, "中性情景应与基线完全一致");
    assert_eq!(result.delta.shortage_delta, 0);
    assert_eq!(result.delta.recommendation_count_delta, 0);
    assert_eq!(result.delta.mean_spi_delta, 0.0);
    assert_eq!(result.delta.saving_delta, 0.0);
    println!("✓ 中性情景与基线一致");
}

// ==========================================
// 测试用例 2: 需求上浮 20%
// ==========================================

#[test]
fn test_demand_increase_shrinks_transfer() {
    println!("\n=== 测试：需求 +20% ===");

    let (stock, forecasts) = electronics_pair();
    let config = config_with_model(SavingModel::RecipientAvoidance);

    let result = ScenarioSimulator::new()
        .simulate_with_forecasts(&stock, &forecasts, &ScenarioParameters::new(20.0, 0.0), &config)
        .unwrap();

    let scores = &result.scaled_run.scores;
    let w1 = scores.iter().find(|s| s.warehouse_id == "W1").unwrap();
    let w2 = scores.iter().find(|s| s.warehouse_id == "W2").unwrap();
    assert!((w1.predicted_demand_units - 24.0).abs() < 1e-9);
    assert!((w1.spi - 16.0).abs() < 1e-9, "W1 SPI 应降为 +16");
    assert!((w2.spi + 32.0).abs() < 1e-9, "W2 SPI 应降为 -32");

    let recs = &result.scaled_run.recommendations;
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].units, 16, "调拨量受调出方盈余限制");
    assert!((recs[0].estimated_saving - 64.0).abs() < 1e-9);

    assert!((result.delta.saving_delta + 16.0).abs() < 1e-9, "节省差异应为 -16");
    assert_eq!(result.delta.shortage_delta, 0);
    assert_eq!(result.delta.recommendation_count_delta, 0);
    assert!((result.delta.mean_spi_delta + 3.0).abs() < 1e-9, "平均 SPI 从 -5 降到 -8");
    println!("✓ saving_delta = {}", result.delta.saving_delta);
}

#[test]
fn test_simulate_from_orders_matches_forecast_path() {
    let (stock, forecasts) = electronics_pair();
    let orders = electronics_pair_orders();
    let config = config_with_model(SavingModel::RecipientAvoidance);
    let params = ScenarioParameters::new(20.0, 0.0);
    let simulator = ScenarioSimulator::new();

    let from_orders = simulator.simulate(&stock, &orders, &params, &config).unwrap();
    let from_table = simulator
        .simulate_with_forecasts(&stock, &forecasts, &params, &config)
        .unwrap();

    assert_eq!(from_orders.delta, from_table.delta);
    assert_eq!(
        from_orders.scaled_run.recommendations,
        from_table.scaled_run.recommendations
    );
}

// ==========================================
// 测试用例 3: 仓储成本扰动
// ==========================================

#[test]
fn test_storage_cost_scaling_changes_saving_only() {
    let (stock, forecasts) = electronics_pair();
    let config = config_with_model(SavingModel::RecipientAvoidance);

    let result = ScenarioSimulator::new()
        .simulate_with_forecasts(&stock, &forecasts, &ScenarioParameters::new(0.0, 25.0), &config)
        .unwrap();

    // 成本 8→10, 12→15; 节省 20×5 = 100
    let rec = &result.scaled_run.recommendations[0];
    assert_eq!(rec.units, 20);
    assert!((rec.estimated_saving - 100.0).abs() < 1e-9);
    assert!((result.delta.saving_delta - 20.0).abs() < 1e-9);
    assert_eq!(result.delta.mean_spi_delta, 0.0, "成本扰动不影响 SPI");

    // 基线数据未被修改
    assert_eq!(stock[0].storage_cost_per_unit, 8.0);
}

// ==========================================
// 测试用例 4: 参数越界拒绝
// ==========================================

#[test]
fn test_out_of_range_parameter_rejected() {
    let (stock, forecasts) = electronics_pair();
    let config = EngineConfig::default();
    let simulator = ScenarioSimulator::new();

    let err = simulator
        .simulate_with_forecasts(&stock, &forecasts, &ScenarioParameters::new(75.0, 0.0), &config)
        .unwrap_err();
    match &err {
        EngineError::ScenarioParameterOutOfRange { parameter, value, .. } => {
            assert_eq!(parameter, "demand_change_pct");
            assert_eq!(*value, 75.0);
        }
        other => panic!("期望 ScenarioParameterOutOfRange, 实际 {:?}", other),
    }
    assert!(err.to_string().contains("demand_change_pct"));

    let err = simulator
        .simulate_with_forecasts(&stock, &forecasts, &ScenarioParameters::new(0.0, -31.0), &config)
        .unwrap_err();
    assert_eq!(err.parameter(), Some("storage_cost_change_pct"));
    println!("✓ 越界参数被拒绝, 未静默钳制");
}

#[test]
fn test_custom_bounds_from_config() {
    let (stock, forecasts) = electronics_pair();
    let mut config = EngineConfig::default();
    config.scenario_bounds.demand_max_pct = 80.0;

    let result = ScenarioSimulator::new().simulate_with_forecasts(
        &stock,
        &forecasts,
        &ScenarioParameters::new(75.0, 0.0),
        &config,
    );
    assert!(result.is_ok(), "放宽边界后 +75% 应被接受");
}

// ==========================================
// 测试用例 5: 多情景对比
// ==========================================

#[test]
fn test_compare_presets_in_input_order() {
    println!("\n=== 测试：预设情景对比 ===");

    let (stock, _) = electronics_pair();
    let orders = electronics_pair_orders();
    let config = config_with_model(SavingModel::RecipientAvoidance);

    let scenarios = ScenarioSimulator::preset_scenarios(ScenarioParameters::new(20.0, 0.0));
    let rows = ScenarioSimulator::new()
        .compare(&stock, &orders, &scenarios, &config)
        .unwrap();

    let names: Vec<&str> = rows.iter().map(|r| r.scenario.as_str()).collect();
    assert_eq!(names, vec!["Best Case", "Worst Case", "Current"]);

    let current = &rows[2];
    assert!((current.total_saving - 64.0).abs() < 1e-9);
    assert_eq!(current.recommendation_count, 1);
    assert!((current.shortage_percentage - 50.0).abs() < 1e-9);

    // 需求越低, 平均 SPI 越高
    assert!(rows[0].mean_spi > rows[2].mean_spi);
    assert!(rows[1].mean_spi < rows[2].mean_spi);

    for row in &rows {
        println!(
            "  - {}: 缺货率 {:.1}%, 平均 SPI {:.2}, 节省 {:.1}",
            row.scenario, row.shortage_percentage, row.mean_spi, row.total_saving
        );
    }
}

#[test]
fn test_compare_rejects_any_invalid_scenario() {
    let (stock, _) = electronics_pair();
    let scenarios = vec![
        NamedScenario::best_case(),
        NamedScenario::new("Extreme", 90.0, 0.0),
    ];
    let err = ScenarioSimulator::new()
        .compare(&stock, &[], &scenarios, &EngineConfig::default())
        .unwrap_err();
    assert_eq!(err.parameter(), Some("demand_change_pct"));
}
