// ==========================================
// 仓间调拨建议系统 - 导入 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// ==========================================

use crate::domain::dq::DqViolation;
use crate::importer::error::ImportResult;
use std::collections::HashMap;
use std::path::Path;

// ==========================================
// ParsedTable - 解析后的原始表
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ParsedTable {
    pub headers: Vec<String>,
    /// (原始行号, 列名 → 值)
    pub rows: Vec<(usize, HashMap<String, String>)>,
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: CsvParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始表
    ///
    /// # 返回
    /// - Ok(ParsedTable): 表头 + 非空数据行
    /// - Err: 文件不存在、格式不支持、CSV 语法错误
    fn parse_to_table(&self, file_path: &Path) -> ImportResult<ParsedTable>;
}

// ==========================================
// RecordValidator Trait
// ==========================================
// 用途: 行级数据质量校验（阶段 2）
// 实现者: DqValidator
pub trait RecordValidator<T>: Send + Sync {
    /// 校验单条记录
    ///
    /// # 返回
    /// 违规列表; 含 ERROR 级别时该行不导入
    fn validate(&self, record: &T, row_number: usize) -> Vec<DqViolation>;
}
