// ==========================================
// 仓间调拨建议系统 - 结果导出器
// ==========================================
// 评分/调拨建议/情景对比均为扁平结构, 直接按字段序列化为 CSV 列
// 列名与 JSON 字段名一致; 无数据行时仍写出表头
// ==========================================

use crate::domain::pressure::PressureScore;
use crate::domain::run::RunResult;
use crate::domain::scenario::ScenarioComparisonRow;
use crate::domain::transfer::TransferRecommendation;
use crate::export::error::{ExportError, ExportResult};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

pub const SCORES_FILE: &str = "pressure_scores.csv";
pub const RECOMMENDATIONS_FILE: &str = "transfer_recommendations.csv";
pub const RUN_JSON_FILE: &str = "run_result.json";

// ==========================================
// 列定义 (与结构体字段顺序一致)
// ==========================================
pub const SCORE_COLUMNS: &[&str] = &[
    "warehouse_id",
    "location",
    "category",
    "current_stock_units",
    "reorder_level",
    "predicted_demand_units",
    "storage_cost_per_unit",
    "spi",
];

pub const RECOMMENDATION_COLUMNS: &[&str] = &[
    "category",
    "from_warehouse",
    "from_location",
    "to_warehouse",
    "to_location",
    "units",
    "estimated_saving",
    "priority",
    "donor_spi",
    "recipient_spi",
];

pub const COMPARISON_COLUMNS: &[&str] = &[
    "scenario",
    "demand_change_pct",
    "storage_cost_change_pct",
    "shortage_percentage",
    "mean_spi",
    "total_saving",
    "recommendation_count",
];

pub struct ResultExporter;

impl ResultExporter {
    /// 写出扁平行 (表头固定由 columns 给出)
    ///
    /// # 返回
    /// 写出的数据行数 (不含表头)
    pub fn write_rows<W: Write, T: Serialize>(
        &self,
        writer: W,
        columns: &[&str],
        rows: &[T],
    ) -> ExportResult<usize> {
        let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
        wtr.write_record(columns)?;
        for row in rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(rows.len())
    }

    pub fn write_scores<W: Write>(&self, writer: W, scores: &[PressureScore]) -> ExportResult<usize> {
        self.write_rows(writer, SCORE_COLUMNS, scores)
    }

    pub fn write_recommendations<W: Write>(
        &self,
        writer: W,
        recommendations: &[TransferRecommendation],
    ) -> ExportResult<usize> {
        self.write_rows(writer, RECOMMENDATION_COLUMNS, recommendations)
    }

    pub fn write_comparison<W: Write>(
        &self,
        writer: W,
        rows: &[ScenarioComparisonRow],
    ) -> ExportResult<usize> {
        self.write_rows(writer, COMPARISON_COLUMNS, rows)
    }

    /// 写出 JSON (美化格式)
    pub fn write_json<W: Write, T: Serialize>(&self, mut writer: W, value: &T) -> ExportResult<()> {
        serde_json::to_writer_pretty(&mut writer, value)?;
        writeln!(writer)?;
        Ok(())
    }

    /// 导出一次运行结果到目录
    ///
    /// # 生成文件
    /// - pressure_scores.csv
    /// - transfer_recommendations.csv
    /// - run_result.json (含指标与告警)
    pub fn export_run(&self, dir: &Path, result: &RunResult) -> ExportResult<Vec<PathBuf>> {
        fs::create_dir_all(dir).map_err(|e| ExportError::FileWriteError {
            path: dir.display().to_string(),
            message: e.to_string(),
        })?;

        let scores_path = dir.join(SCORES_FILE);
        self.write_scores(Self::create(&scores_path)?, &result.scores)?;

        let recs_path = dir.join(RECOMMENDATIONS_FILE);
        self.write_recommendations(Self::create(&recs_path)?, &result.recommendations)?;

        let json_path = dir.join(RUN_JSON_FILE);
        self.write_json(Self::create(&json_path)?, result)?;

        info!(
            dir = %dir.display(),
            scores = result.scores.len(),
            recommendations = result.recommendations.len(),
            "运行结果已导出"
        );
        Ok(vec![scores_path, recs_path, json_path])
    }

    /// 导出情景对比表
    pub fn export_comparison(&self, path: &Path, rows: &[ScenarioComparisonRow]) -> ExportResult<()> {
        let count = self.write_comparison(Self::create(path)?, rows)?;
        info!(path = %path.display(), rows = count, "情景对比已导出");
        Ok(())
    }

    fn create(path: &Path) -> ExportResult<File> {
        File::create(path).map_err(|e| ExportError::FileWriteError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}
