// ==========================================
// 仓间调拨建议系统 - 导入数据质量领域模型
// ==========================================
// 用途: 导入层对 CSV 行的校验结果
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// DqLevel - 数据质量级别
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DqLevel {
    Error,   // 错误（该行不导入）
    Warning, // 警告（允许导入）
    Info,    // 提示（仅记录）
}

// ==========================================
// DqViolation - 数据质量违规
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DqViolation {
    pub row_number: usize,          // 原始文件行号 (表头为第 1 行)
    pub record_key: Option<String>, // 记录标识（仓库ID/订单号, 如可解析）
    pub level: DqLevel,
    pub field: String,
    pub message: String,
}

// ==========================================
// DqSummary - 数据质量汇总
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DqSummary {
    pub total_rows: usize, // 总行数
    pub success: usize,    // 成功导入
    pub blocked: usize,    // 阻断（ERROR）
    pub warning: usize,    // 带警告导入
}

// ==========================================
// DqReport - 数据质量报告
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DqReport {
    pub source: String, // 来源文件
    pub summary: DqSummary,
    pub violations: Vec<DqViolation>,
}

impl DqReport {
    pub fn has_errors(&self) -> bool {
        self.violations.iter().any(|v| v.level == DqLevel::Error)
    }
}
