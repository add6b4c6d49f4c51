//! Error types for the normalization pipeline.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    // === Input Errors ===
    /// The sheet set holds no sheets at all.
    #[error("submission {filename} contains no sheets")]
    NoSheets { filename: String },

    // === Export Errors ===
    /// The quality report is not index-aligned with the frame.
    #[error("quality report has {report_rows} rows but the frame has {rows}")]
    ReportMismatch { rows: usize, report_rows: usize },

    // === DataFrame Errors ===
    /// Failed to build the exported frame.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for PipelineError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
