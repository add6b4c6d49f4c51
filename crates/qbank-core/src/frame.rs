//! Canonical frame export to polars.

use polars::prelude::{Column, DataFrame, NamedFrom, Series};

use qbank_model::{CanonicalFrame, EXERCISE_COLUMNS, QA_COLUMNS};
use qbank_validate::QualityReport;

use crate::error::{PipelineError, Result};

pub const QUALITY_SCORE_COLUMN: &str = "quality_score";
pub const QUALITY_FLAGS_COLUMN: &str = "quality_flags";

fn string_column(name: &str, values: Vec<String>) -> Column {
    Series::new(name.into(), values).into()
}

/// Builds a `DataFrame` with the canonical columns in canonical order.
///
/// With a report, `quality_score` and `quality_flags` are appended. The
/// report must be index-aligned with the frame.
pub fn to_dataframe(frame: &CanonicalFrame, report: Option<&QualityReport>) -> Result<DataFrame> {
    let mut columns: Vec<Column> = match frame {
        CanonicalFrame::Qa(rows) => {
            let values: [Vec<String>; 2] = [
                rows.iter().map(|r| r.question.clone()).collect(),
                rows.iter().map(|r| r.answer.clone()).collect(),
            ];
            QA_COLUMNS
                .iter()
                .zip(values)
                .map(|(name, values)| string_column(name, values))
                .collect()
        }
        CanonicalFrame::Exercise(rows) => {
            let values: [Vec<String>; 7] = [
                rows.iter().map(|r| r.exercise_type.to_string()).collect(),
                rows.iter().map(|r| r.stem.clone()).collect(),
                rows.iter().map(|r| r.options.clone()).collect(),
                rows.iter().map(|r| r.answer.clone()).collect(),
                rows.iter().map(|r| r.knowledge.clone()).collect(),
                rows.iter().map(|r| r.analysis.clone()).collect(),
                rows.iter().map(|r| r.level.to_string()).collect(),
            ];
            EXERCISE_COLUMNS
                .iter()
                .zip(values)
                .map(|(name, values)| string_column(name, values))
                .collect()
        }
    };

    if let Some(report) = report {
        if report.len() != frame.len() {
            return Err(PipelineError::ReportMismatch {
                rows: frame.len(),
                report_rows: report.len(),
            });
        }
        let scores: Vec<u32> = report.scores().into_iter().map(u32::from).collect();
        columns.push(Series::new(QUALITY_SCORE_COLUMN.into(), scores).into());
        columns.push(string_column(QUALITY_FLAGS_COLUMN, report.flags_column()));
    }

    Ok(DataFrame::new(columns)?)
}
