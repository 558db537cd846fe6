// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持中文（默认）和英文, 词条见 locales/*.yml
// 用途: 数据质量告警文案 + 命令行提示
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

use crate::domain::types::WarningKind;
use std::fmt;
use std::str::FromStr;

// ==========================================
// Locale - 支持的语言
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    ZhCn,
    En,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Locale::ZhCn => "zh-CN",
            Locale::En => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zh" | "zh-cn" | "zh_cn" => Ok(Locale::ZhCn),
            "en" | "en-us" | "en_us" => Ok(Locale::En),
            other => Err(format!("不支持的语言: {}", other)),
        }
    }
}

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
pub fn set_locale(locale: Locale) {
    rust_i18n::set_locale(locale.code());
}

/// 翻译消息（无参数）
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数, 占位符形如 %{name}）
///
/// # 示例
/// ```no_run
/// use stock_transfer_advisor::i18n::t_with_args;
/// let msg = t_with_args("dq.invalid_storage_cost", &[("value", "-3")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = t(key);
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

/// 告警类型对应的词条
pub fn warning_key(kind: WarningKind) -> &'static str {
    match kind {
        WarningKind::MissingStockField => "dq.missing_stock_field",
        WarningKind::DuplicateStockRecord => "dq.duplicate_stock_record",
        WarningKind::InvalidStorageCost => "dq.invalid_storage_cost",
    }
}

/// 数据质量告警文案
pub fn warning_message(kind: WarningKind, args: &[(&str, &str)]) -> String {
    t_with_args(warning_key(kind), args)
}
