// ==========================================
// 导入 → 分析 → 导出 端到端测试
// ==========================================
// 测试范围: CSV 导入 (含 DQ 报告) → RunPipeline → ResultExporter
// ==========================================

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use stock_transfer_advisor::config::{EngineConfig, SavingModel};
use stock_transfer_advisor::domain::dq::DqLevel;
use stock_transfer_advisor::engine::{RunPipeline, ScenarioSimulator};
use stock_transfer_advisor::export::{
    ResultExporter, RECOMMENDATIONS_FILE, RECOMMENDATION_COLUMNS, RUN_JSON_FILE, SCORES_FILE,
};
use stock_transfer_advisor::importer::{DatasetImporter, ImportError};
use stock_transfer_advisor::{RunResult, ScenarioParameters};
use tempfile::TempDir;

const STOCK_CSV: &str = "\
Warehouse_ID,Location,Product_Category,Current_Stock_Units,Reorder_Level,Storage_Cost_per_Unit
W1,Mumbai,Electronics,100,60,8.0
W2,Delhi,Electronics,30,50,12.0
W3,Pune,Electronics,-4,10,5.0
W4,Chennai,Toys,,20,3.0
";

const ORDERS_CSV: &str = "\
Order_ID,Order_Date,Origin,Product_Category,Order_Value_INR
M-01,2024-01-15,Mumbai,Electronics,20000
M-02,2024-02-15,Mumbai,Electronics,20000
M-03,2024-03-15,Mumbai,Electronics,20000
D-01,2024-01-15,Delhi,Electronics,10000
D-02,2024-02-15,Delhi,Electronics,10000
D-03,2024-03-15,Delhi,Electronics,10000
X-01,2024-03-20,Kolkata,Electronics,900000
B-01,not-a-date,Delhi,Electronics,10000
";

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    let mut file = fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[test]
fn test_import_run_export_end_to_end() {
    stock_transfer_advisor::logging::init_test();
    println!("\n=== 测试：CSV 导入 → 分析 → 导出 ===");

    let dir = TempDir::new().unwrap();
    let stock_path = write_file(dir.path(), "stock.csv", STOCK_CSV);
    let orders_path = write_file(dir.path(), "orders.csv", ORDERS_CSV);

    // 导入
    let dataset = DatasetImporter::new().load(&stock_path, &orders_path).unwrap();
    assert_eq!(dataset.stock.len(), 3, "负库存行被阻断");
    assert_eq!(dataset.stock_report.summary.blocked, 1);
    assert_eq!(dataset.stock_report.summary.warning, 1);
    assert_eq!(dataset.orders.len(), 7, "日期错误的订单被阻断");
    assert!(dataset
        .order_report
        .violations
        .iter()
        .any(|v| v.level == DqLevel::Error && v.field == "order_date"));
    println!("✓ 导入完成: 库存 {} 行, 订单 {} 行", dataset.stock.len(), dataset.orders.len());

    // 分析
    let mut config = EngineConfig::default();
    config.transfer.saving_model = SavingModel::RecipientAvoidance;
    let result = RunPipeline::new().run(&dataset.stock, &dataset.orders, &config);

    assert_eq!(result.scores.len(), 2, "缺库存的 W4 在评分阶段被排除");
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.recommendations.len(), 1);
    assert_eq!(result.recommendations[0].units, 20);
    assert!((result.recommendations[0].estimated_saving - 80.0).abs() < 1e-9);

    // 导出
    let out_dir = dir.path().join("out");
    let paths = ResultExporter.export_run(&out_dir, &result).unwrap();
    assert_eq!(paths.len(), 3);

    let recs_csv = fs::read_to_string(out_dir.join(RECOMMENDATIONS_FILE)).unwrap();
    assert_eq!(recs_csv.lines().count(), 2, "表头 + 1 条建议");
    assert!(recs_csv.contains("W1,Mumbai,W2,Delhi,20,80.0,MEDIUM"));

    let scores_csv = fs::read_to_string(out_dir.join(SCORES_FILE)).unwrap();
    assert!(scores_csv.starts_with("warehouse_id,location,category"));
    assert_eq!(scores_csv.lines().count(), 3);

    let json = fs::read_to_string(out_dir.join(RUN_JSON_FILE)).unwrap();
    let restored: RunResult = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.recommendations, result.recommendations);
    assert_eq!(restored.metrics.total_shortage_count, 1);
    println!("✓ 导出完成: {:?}", paths);
}

#[test]
fn test_balanced_run_exports_header_only_recommendations() {
    // 两仓均无缺口 → 无调拨建议
    let dir = TempDir::new().unwrap();
    let stock_path = write_file(
        dir.path(),
        "stock.csv",
        "Warehouse_ID,Location,Product_Category,Current_Stock_Units,Reorder_Level,Storage_Cost_per_Unit\n\
         W1,Mumbai,Toys,50,10,3.0\n\
         W2,Delhi,Toys,40,10,4.0\n",
    );
    let orders_path = write_file(
        dir.path(),
        "orders.csv",
        "Order_ID,Order_Date,Origin,Product_Category,Order_Value_INR\n",
    );
    let dataset = DatasetImporter::new().load(&stock_path, &orders_path).unwrap();
    let result = RunPipeline::new().run(&dataset.stock, &dataset.orders, &EngineConfig::default());
    assert!(result.recommendations.is_empty());

    let out_dir = dir.path().join("out");
    ResultExporter.export_run(&out_dir, &result).unwrap();

    let recs_csv = fs::read_to_string(out_dir.join(RECOMMENDATIONS_FILE)).unwrap();
    assert_eq!(recs_csv.lines().count(), 1, "空建议表仍保留表头");
    assert_eq!(recs_csv.trim_end(), RECOMMENDATION_COLUMNS.join(","));
    println!("✓ 空建议表导出表头");
}

#[test]
fn test_export_scenario_comparison() {
    let dir = TempDir::new().unwrap();
    let stock_path = write_file(dir.path(), "stock.csv", STOCK_CSV);
    let orders_path = write_file(dir.path(), "orders.csv", ORDERS_CSV);
    let dataset = DatasetImporter::new().load(&stock_path, &orders_path).unwrap();

    let scenarios = ScenarioSimulator::preset_scenarios(ScenarioParameters::neutral());
    let rows = ScenarioSimulator::new()
        .compare(&dataset.stock, &dataset.orders, &scenarios, &EngineConfig::default())
        .unwrap();

    let path = dir.path().join("comparison.csv");
    ResultExporter.export_comparison(&path, &rows).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "scenario,demand_change_pct,storage_cost_change_pct,shortage_percentage,mean_spi,total_saving,recommendation_count"
    );
    assert!(lines.next().unwrap().starts_with("Best Case,-20.0,-10.0"));
    assert_eq!(text.lines().count(), 4);
}

#[test]
fn test_missing_required_column_is_rejected() {
    let dir = TempDir::new().unwrap();
    let stock_path = write_file(
        dir.path(),
        "stock.csv",
        "Warehouse_ID,Location,Product_Category,Current_Stock_Units\nW1,Mumbai,Toys,5\n",
    );
    let err = DatasetImporter::new().import_stock(&stock_path).unwrap_err();
    assert!(matches!(err, ImportError::MissingColumns { .. }));
    assert!(err.to_string().contains("reorder_level"));
}

#[test]
fn test_missing_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let err = DatasetImporter::new()
        .import_orders(dir.path().join("nope.csv"))
        .unwrap_err();
    assert!(matches!(err, ImportError::FileNotFound(_)));
}
