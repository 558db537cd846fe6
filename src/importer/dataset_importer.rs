// ==========================================
// 仓间调拨建议系统 - 数据集导入器
// ==========================================
// 主流程:
//   1. 解析 CSV → ParsedTable
//   2. 必需列检查 (缺列 → 文件级错误)
//   3. 字段映射 (类型错误 → 行级 ERROR)
//   4. DQ 校验 (ERROR 行阻断, WARNING 行导入)
//   5. 转为领域记录
// ==========================================

use crate::domain::dq::{DqLevel, DqReport, DqSummary, DqViolation};
use crate::domain::order::OrderRecord;
use crate::domain::stock::StockSnapshotRecord;
use crate::importer::dq_validator::DqValidator;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::{FieldMapper, ORDER_REQUIRED, STOCK_REQUIRED};
use crate::importer::file_parser::CsvParser;
use crate::importer::importer_trait::{FileParser, ParsedTable, RecordValidator};
use serde::Serialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

// ==========================================
// 导入结果
// ==========================================
#[derive(Debug, Clone, Default, Serialize)]
pub struct StockImport {
    pub records: Vec<StockSnapshotRecord>,
    pub report: DqReport,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct OrderImport {
    pub records: Vec<OrderRecord>,
    pub report: DqReport,
}

/// 一次运行所需的完整输入
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportedDataset {
    pub stock: Vec<StockSnapshotRecord>,
    pub orders: Vec<OrderRecord>,
    pub stock_report: DqReport,
    pub order_report: DqReport,
}

// ==========================================
// DatasetImporter
// ==========================================
pub struct DatasetImporter {
    parser: CsvParser,
    mapper: FieldMapper,
    validator: DqValidator,
}

impl Default for DatasetImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetImporter {
    pub fn new() -> Self {
        Self {
            parser: CsvParser,
            mapper: FieldMapper,
            validator: DqValidator,
        }
    }

    /// 导入库存快照 CSV
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn import_stock<P: AsRef<Path>>(&self, path: P) -> ImportResult<StockImport> {
        let path = path.as_ref();
        let table = self.parser.parse_to_table(path)?;
        self.stock_from_table(table, &path.display().to_string())
    }

    /// 从任意 Reader 导入库存快照
    pub fn import_stock_from_reader<R: Read>(
        &self,
        reader: R,
        source: &str,
    ) -> ImportResult<StockImport> {
        let table = self.parser.parse_reader(reader)?;
        self.stock_from_table(table, source)
    }

    /// 导入历史订单 CSV
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn import_orders<P: AsRef<Path>>(&self, path: P) -> ImportResult<OrderImport> {
        let path = path.as_ref();
        let table = self.parser.parse_to_table(path)?;
        self.orders_from_table(table, &path.display().to_string())
    }

    /// 从任意 Reader 导入历史订单
    pub fn import_orders_from_reader<R: Read>(
        &self,
        reader: R,
        source: &str,
    ) -> ImportResult<OrderImport> {
        let table = self.parser.parse_reader(reader)?;
        self.orders_from_table(table, source)
    }

    /// 导入库存 + 订单
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        stock_path: P,
        orders_path: Q,
    ) -> ImportResult<ImportedDataset> {
        let start_time = Instant::now();
        let stock = self.import_stock(stock_path)?;
        let orders = self.import_orders(orders_path)?;

        info!(
            stock_records = stock.records.len(),
            order_records = orders.records.len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "数据集导入完成"
        );

        Ok(ImportedDataset {
            stock: stock.records,
            orders: orders.records,
            stock_report: stock.report,
            order_report: orders.report,
        })
    }

    fn stock_from_table(&self, table: ParsedTable, source: &str) -> ImportResult<StockImport> {
        let (records, report) = self.process(
            table,
            source,
            STOCK_REQUIRED,
            |mapper, row, n| mapper.map_stock_row(row, n),
            DqValidator::to_snapshot,
        )?;
        Ok(StockImport { records, report })
    }

    fn orders_from_table(&self, table: ParsedTable, source: &str) -> ImportResult<OrderImport> {
        let (records, report) = self.process(
            table,
            source,
            ORDER_REQUIRED,
            |mapper, row, n| mapper.map_order_row(row, n),
            DqValidator::to_order,
        )?;
        Ok(OrderImport { records, report })
    }

    /// 通用行处理: 缺列检查 → 映射 → 校验 → 转换
    fn process<Raw, Rec, M, C>(
        &self,
        table: ParsedTable,
        source: &str,
        required: &[&str],
        map: M,
        convert: C,
    ) -> ImportResult<(Vec<Rec>, DqReport)>
    where
        DqValidator: RecordValidator<Raw>,
        M: Fn(&FieldMapper, &HashMap<String, String>, usize) -> ImportResult<Raw>,
        C: Fn(&Raw) -> Option<Rec>,
    {
        debug!(source, "步骤 1: 必需列检查");
        let missing = FieldMapper::missing_columns(&table.headers, required);
        if !missing.is_empty() {
            return Err(ImportError::MissingColumns {
                source_name: source.to_string(),
                columns: missing,
            });
        }

        let mut summary = DqSummary {
            total_rows: table.rows.len(),
            ..DqSummary::default()
        };
        let mut violations = Vec::new();
        let mut records = Vec::with_capacity(table.rows.len());

        debug!(rows = table.rows.len(), "步骤 2: 字段映射与 DQ 校验");
        for (row_number, row) in &table.rows {
            let raw = match map(&self.mapper, row, *row_number) {
                Ok(raw) => raw,
                Err(e) => {
                    warn!(row_number, error = %e, "字段映射失败");
                    violations.push(DqViolation {
                        row_number: *row_number,
                        record_key: None,
                        level: DqLevel::Error,
                        field: e.field().unwrap_or_default().to_string(),
                        message: e.to_string(),
                    });
                    summary.blocked += 1;
                    continue;
                }
            };

            let row_violations = self.validator.validate(&raw, *row_number);
            let blocked = row_violations.iter().any(|v| v.level == DqLevel::Error);
            let warned = row_violations.iter().any(|v| v.level == DqLevel::Warning);
            violations.extend(row_violations);

            if blocked {
                summary.blocked += 1;
                continue;
            }
            match convert(&raw) {
                Some(record) => {
                    records.push(record);
                    summary.success += 1;
                    if warned {
                        summary.warning += 1;
                    }
                }
                None => summary.blocked += 1,
            }
        }

        info!(
            source,
            total = summary.total_rows,
            success = summary.success,
            blocked = summary.blocked,
            warning = summary.warning,
            "DQ 校验完成"
        );

        Ok((
            records,
            DqReport {
                source: source.to_string(),
                summary,
                violations,
            },
        ))
    }
}
