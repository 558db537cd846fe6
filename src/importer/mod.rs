// ==========================================
// 仓间调拨建议系统 - 导入层
// ==========================================
// 职责: 外部 CSV 导入, 生成库存快照与历史订单
// 支持: CSV
// ==========================================

pub mod dataset_importer;
pub mod dq_validator;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod importer_trait;

// 重导出核心类型
pub use dataset_importer::{DatasetImporter, ImportedDataset, OrderImport, StockImport};
pub use dq_validator::DqValidator;
pub use error::{ImportError, ImportResult};
pub use field_mapper::{FieldMapper, RawOrderRow, RawStockRow};
pub use file_parser::CsvParser;

// 重导出 Trait 接口
pub use importer_trait::{FileParser, ParsedTable, RecordValidator};
