// ==========================================
// 仓间调拨建议系统 - 命令行主入口
// ==========================================
// 子命令: run / simulate / compare
// 结果以 JSON 写到 stdout, 日志写到 stderr
// ==========================================

mod cli;

use anyhow::{Context, Result};
use cli::{Commands, CommandLine, InputArgs, LogFormatArg};
use std::io;
use stock_transfer_advisor::config::{ConfigManager, EngineConfig};
use stock_transfer_advisor::i18n::{set_locale, t_with_args};
use stock_transfer_advisor::importer::ImportedDataset;
use stock_transfer_advisor::logging::{self, LogFormat};
use stock_transfer_advisor::{
    DatasetImporter, ResultExporter, RunPipeline, ScenarioParameters, ScenarioSimulator,
};

fn main() -> Result<()> {
    let commands = CommandLine::parse_args();

    let format = match commands.log_format {
        LogFormatArg::Text => LogFormat::Text,
        LogFormatArg::Json => LogFormat::Json,
    };
    logging::init_with(format, "info");
    if let Some(locale) = commands.locale {
        set_locale(locale);
    }

    tracing::info!(
        version = stock_transfer_advisor::VERSION,
        "{}",
        stock_transfer_advisor::APP_NAME
    );

    // 加载配置
    let manager = match &commands.config {
        Some(path) => ConfigManager::from_file(path)
            .with_context(|| format!("无法加载配置文件 {}", path.display()))?,
        None => ConfigManager::load_default().context("无法加载默认配置")?,
    };
    let base_config = manager.engine_config().context("配置校验失败")?;

    let exporter = ResultExporter;
    let stdout = io::stdout();

    match commands.command {
        Commands::Run { input, export_dir } => {
            let config = apply_overrides(base_config, &input);
            let dataset = load(&input)?;
            let result = RunPipeline::new().run(&dataset.stock, &dataset.orders, &config);

            tracing::info!(
                "{}",
                t_with_args(
                    "cli.run_done",
                    &[
                        ("scores", &result.scores.len().to_string()),
                        ("recommendations", &result.recommendations.len().to_string()),
                    ],
                )
            );

            if let Some(dir) = export_dir {
                let paths = exporter.export_run(&dir, &result)?;
                for path in paths {
                    let shown = path.display().to_string();
                    tracing::info!("{}", t_with_args("cli.exported", &[("path", &shown)]));
                }
            }
            exporter.write_json(stdout.lock(), &result)?;
        }
        Commands::Simulate { input, scenario } => {
            let config = apply_overrides(base_config, &input);
            let dataset = load(&input)?;
            let params = ScenarioParameters::new(scenario.demand_change, scenario.cost_change);
            let result = ScenarioSimulator::new()
                .simulate(&dataset.stock, &dataset.orders, &params, &config)
                .context("情景模拟失败")?;

            tracing::info!(
                "{}",
                t_with_args(
                    "cli.scenario_done",
                    &[
                        ("demand", &scenario.demand_change.to_string()),
                        ("cost", &scenario.cost_change.to_string()),
                    ],
                )
            );
            exporter.write_json(stdout.lock(), &result)?;
        }
        Commands::Compare {
            input,
            scenario,
            export,
        } => {
            let config = apply_overrides(base_config, &input);
            let dataset = load(&input)?;
            let current = ScenarioParameters::new(scenario.demand_change, scenario.cost_change);
            let scenarios = ScenarioSimulator::preset_scenarios(current);
            let rows = ScenarioSimulator::new()
                .compare(&dataset.stock, &dataset.orders, &scenarios, &config)
                .context("情景对比失败")?;

            if let Some(path) = export {
                exporter.export_comparison(&path, &rows)?;
            }
            exporter.write_json(stdout.lock(), &rows)?;
        }
    }

    Ok(())
}

/// 导入库存与订单, 并把 DQ 汇总写入日志
fn load(input: &InputArgs) -> Result<ImportedDataset> {
    let dataset = DatasetImporter::new()
        .load(&input.stock, &input.orders)
        .context("数据导入失败")?;

    for report in [&dataset.stock_report, &dataset.order_report] {
        tracing::info!(
            "{}",
            t_with_args(
                "import.summary",
                &[
                    ("source", &report.source),
                    ("total", &report.summary.total_rows.to_string()),
                    ("success", &report.summary.success.to_string()),
                    ("blocked", &report.summary.blocked.to_string()),
                ],
            )
        );
        for violation in &report.violations {
            tracing::warn!(
                source = %report.source,
                row_number = violation.row_number,
                field = %violation.field,
                level = ?violation.level,
                "{}",
                violation.message
            );
        }
    }
    Ok(dataset)
}

/// 命令行覆盖项
fn apply_overrides(mut config: EngineConfig, input: &InputArgs) -> EngineConfig {
    if let Some(model) = input.saving_model {
        config.transfer.saving_model = model;
    }
    config
}
