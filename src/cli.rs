// ==========================================
// 仓间调拨建议系统 - 命令行定义
// ==========================================

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use stock_transfer_advisor::config::SavingModel;
use stock_transfer_advisor::i18n::Locale;

#[derive(Parser)]
#[command(name = "stock-transfer-advisor")]
#[command(version, about = "Inter-warehouse stock transfer advisor.")]
pub struct CommandLine {
    /// Flat JSON config file (defaults to the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormatArg::Text, global = true)]
    pub log_format: LogFormatArg,

    /// Message language (zh-CN or en)
    #[arg(long, global = true)]
    pub locale: Option<Locale>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Forecast demand, score stock pressure and recommend transfers
    Run {
        #[command(flatten)]
        input: InputArgs,

        /// Directory for scores/recommendations CSV and run JSON
        #[arg(long)]
        export_dir: Option<PathBuf>,
    },
    /// Re-run the analysis under a demand/storage-cost perturbation
    Simulate {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        scenario: ScenarioArgs,
    },
    /// Compare best/worst/current scenarios side by side
    Compare {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        scenario: ScenarioArgs,

        /// CSV file for the comparison table
        #[arg(long)]
        export: Option<PathBuf>,
    },
}

#[derive(Args)]
pub struct InputArgs {
    /// Stock snapshot CSV
    #[arg(long)]
    pub stock: PathBuf,

    /// Historical orders CSV
    #[arg(long)]
    pub orders: PathBuf,

    /// Override the configured saving model
    #[arg(long)]
    pub saving_model: Option<SavingModel>,
}

#[derive(Args)]
pub struct ScenarioArgs {
    /// Demand change in percent (e.g. 20 for +20%)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub demand_change: f64,

    /// Storage cost change in percent
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub cost_change: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Text,
    Json,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
