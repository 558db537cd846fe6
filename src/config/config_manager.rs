// ==========================================
// 仓间调拨建议系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、组装 EngineConfig
// 存储: 扁平 key-value JSON 文件 (config_kv 口径)
// ==========================================

use crate::config::engine_config::{
    DemandBasis, EngineConfig, ForecastConfig, PeriodGranularity, SavingModel, ScenarioBounds,
    TransferConfig,
};
use crate::config::error::{ConfigError, ConfigResult};
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "STOCK_TRANSFER_CONFIG";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
// 只读快照: 构造后不再修改,每次运行据此生成 EngineConfig
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    values: BTreeMap<String, String>,
}

impl ConfigManager {
    /// 空配置 (全部使用默认值)
    pub fn new() -> Self {
        Self::default()
    }

    /// 从已有 key-value 构造
    pub fn from_map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// 从 JSON 文本构造
    ///
    /// # 格式
    /// 扁平对象, 值为字符串/数字/布尔: {"forecast.window_periods": 3, ...}
    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        let parsed: Value = serde_json::from_str(raw)?;
        let object = parsed
            .as_object()
            .ok_or_else(|| ConfigError::ParseError("配置根节点必须为对象".to_string()))?;

        let mut values = BTreeMap::new();
        for (key, value) in object {
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null => continue,
                Value::Array(_) | Value::Object(_) => {
                    return Err(ConfigError::InvalidValue {
                        key: key.clone(),
                        message: "配置项必须为标量".to_string(),
                    })
                }
            };
            values.insert(key.clone(), text);
        }

        Ok(Self { values })
    }

    /// 从文件构造 (文件必须存在)
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&raw)
    }

    /// 从默认位置加载
    ///
    /// 查找顺序:
    /// 1. 环境变量 STOCK_TRANSFER_CONFIG
    /// 2. 用户配置目录下的 stock-transfer-advisor/config.json
    ///
    /// 文件不存在时返回空配置 (全部默认值)
    pub fn load_default() -> ConfigResult<Self> {
        let path = default_config_path();
        if !path.exists() {
            tracing::info!(path = %path.display(), "未找到配置文件，使用默认配置");
            return Ok(Self::new());
        }
        tracing::info!(path = %path.display(), "加载配置文件");
        Self::from_file(&path)
    }

    /// 读取原始配置值
    pub fn get_config_value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    /// 解析配置值; 缺失返回默认值, 格式错误记录告警后返回默认值
    fn parse_or_default<T>(&self, key: &str, default: T) -> T
    where
        T: FromStr + Display,
        T::Err: Display,
    {
        match self.get_config_value(key) {
            None => default,
            Some(raw) => match raw.trim().parse::<T>() {
                Ok(v) => v,
                Err(e) => {
                    tracing::warn!(
                        config_key = key,
                        raw_value = %raw,
                        error = %e,
                        default = %default,
                        "配置值格式错误，使用默认值"
                    );
                    default
                }
            },
        }
    }

    /// 组装并校验 EngineConfig
    pub fn engine_config(&self) -> ConfigResult<EngineConfig> {
        let fd = ForecastConfig::default();
        let td = TransferConfig::default();
        let bd = ScenarioBounds::default();

        let as_of = match self.get_config_value(config_keys::FORECAST_AS_OF) {
            None => None,
            Some(raw) => match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
                Ok(d) => Some(d),
                Err(e) => {
                    tracing::warn!(
                        config_key = config_keys::FORECAST_AS_OF,
                        raw_value = %raw,
                        error = %e,
                        "预测基准日格式错误，改用订单最新日期"
                    );
                    None
                }
            },
        };

        let config = EngineConfig {
            forecast: ForecastConfig {
                window_periods: self
                    .parse_or_default(config_keys::FORECAST_WINDOW_PERIODS, fd.window_periods),
                granularity: self.parse_or_default::<PeriodGranularity>(
                    config_keys::FORECAST_GRANULARITY,
                    fd.granularity,
                ),
                basis: self
                    .parse_or_default::<DemandBasis>(config_keys::FORECAST_DEMAND_BASIS, fd.basis),
                value_per_unit: self
                    .parse_or_default(config_keys::FORECAST_VALUE_PER_UNIT, fd.value_per_unit),
                as_of,
            },
            transfer: TransferConfig {
                epsilon: self.parse_or_default(config_keys::TRANSFER_EPSILON, td.epsilon),
                suppress_zero_saving: self.parse_or_default(
                    config_keys::TRANSFER_SUPPRESS_ZERO_SAVING,
                    td.suppress_zero_saving,
                ),
                saving_model: self.parse_or_default::<SavingModel>(
                    config_keys::TRANSFER_SAVING_MODEL,
                    td.saving_model,
                ),
                high_priority_deficit: self.parse_or_default(
                    config_keys::TRANSFER_HIGH_PRIORITY_DEFICIT,
                    td.high_priority_deficit,
                ),
                medium_priority_deficit: self.parse_or_default(
                    config_keys::TRANSFER_MEDIUM_PRIORITY_DEFICIT,
                    td.medium_priority_deficit,
                ),
            },
            scenario_bounds: ScenarioBounds {
                demand_min_pct: self
                    .parse_or_default(config_keys::SCENARIO_DEMAND_MIN_PCT, bd.demand_min_pct),
                demand_max_pct: self
                    .parse_or_default(config_keys::SCENARIO_DEMAND_MAX_PCT, bd.demand_max_pct),
                storage_cost_min_pct: self.parse_or_default(
                    config_keys::SCENARIO_STORAGE_COST_MIN_PCT,
                    bd.storage_cost_min_pct,
                ),
                storage_cost_max_pct: self.parse_or_default(
                    config_keys::SCENARIO_STORAGE_COST_MAX_PCT,
                    bd.storage_cost_max_pct,
                ),
            },
            top_risk_limit: self.parse_or_default(config_keys::METRICS_TOP_RISK_LIMIT, 3usize),
        };

        config.validate()?;
        Ok(config)
    }

    /// 获取所有配置的快照（JSON格式）
    ///
    /// # 用途
    /// - 与运行结果一起导出, 便于复现
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string(&self.values)?)
    }
}

/// 默认配置文件路径
pub fn default_config_path() -> PathBuf {
    // 允许通过环境变量显式指定路径（便于调试/测试/CI）
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    match dirs::config_dir() {
        Some(dir) => dir.join("stock-transfer-advisor").join("config.json"),
        None => PathBuf::from("./stock_transfer_advisor.json"),
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 需求预测
    pub const FORECAST_WINDOW_PERIODS: &str = "forecast.window_periods";
    pub const FORECAST_GRANULARITY: &str = "forecast.granularity";
    pub const FORECAST_DEMAND_BASIS: &str = "forecast.demand_basis";
    pub const FORECAST_VALUE_PER_UNIT: &str = "forecast.value_per_unit";
    pub const FORECAST_AS_OF: &str = "forecast.as_of";

    // 调拨匹配
    pub const TRANSFER_EPSILON: &str = "transfer.epsilon";
    pub const TRANSFER_SUPPRESS_ZERO_SAVING: &str = "transfer.suppress_zero_saving";
    pub const TRANSFER_SAVING_MODEL: &str = "transfer.saving_model";
    pub const TRANSFER_HIGH_PRIORITY_DEFICIT: &str = "transfer.high_priority_deficit";
    pub const TRANSFER_MEDIUM_PRIORITY_DEFICIT: &str = "transfer.medium_priority_deficit";

    // 情景边界
    pub const SCENARIO_DEMAND_MIN_PCT: &str = "scenario.demand_min_pct";
    pub const SCENARIO_DEMAND_MAX_PCT: &str = "scenario.demand_max_pct";
    pub const SCENARIO_STORAGE_COST_MIN_PCT: &str = "scenario.storage_cost_min_pct";
    pub const SCENARIO_STORAGE_COST_MAX_PCT: &str = "scenario.storage_cost_max_pct";

    // 指标
    pub const METRICS_TOP_RISK_LIMIT: &str = "metrics.top_risk_limit";
}
