//! Dataset-level quality aggregation.

use qbank_model::{QualitySummary, Severity};

use crate::assess::QualityReport;

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Aggregates a report into the summary used by gating and reporting.
///
/// An empty report summarizes to all zeros.
pub fn summarize(report: &QualityReport) -> QualitySummary {
    if report.is_empty() {
        return QualitySummary::default();
    }
    let mut summary = QualitySummary::default();
    let mut score_total = 0u64;
    for row in report.iter() {
        score_total += u64::from(row.score);
        if row.has_errors() {
            summary.error_count += 1;
        }
        if row.has_warnings() {
            summary.warn_count += 1;
        }
        for flag in &row.flags {
            let bucket = match flag.severity {
                Severity::Error => &mut summary.errors,
                Severity::Warn => &mut summary.warns,
                Severity::Info => continue,
            };
            *bucket.entry(flag.code.clone()).or_insert(0) += 1;
        }
    }
    let rows = report.len() as f64;
    summary.score_avg = round_to(score_total as f64 / rows, 2);
    summary.error_row_ratio = round_to(summary.error_count as f64 / rows, 4);
    summary
}

/// Coarse grouping of error codes for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorCategory {
    /// `*_EMPTY` codes.
    Missing,
    /// `*_GARBLED` codes.
    Garbled,
    Other,
}

impl ErrorCategory {
    pub const ALL: [ErrorCategory; 3] = [
        ErrorCategory::Missing,
        ErrorCategory::Garbled,
        ErrorCategory::Other,
    ];

    pub fn of(code: &str) -> Self {
        if code.ends_with("_EMPTY") {
            ErrorCategory::Missing
        } else if code.ends_with("_GARBLED") {
            ErrorCategory::Garbled
        } else {
            ErrorCategory::Other
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ErrorCategory::Missing => "缺失",
            ErrorCategory::Garbled => "乱码",
            ErrorCategory::Other => "其他问题",
        }
    }
}

/// Error flag counts per category, in [`ErrorCategory::ALL`] order.
pub fn error_categories(summary: &QualitySummary) -> [(ErrorCategory, usize); 3] {
    ErrorCategory::ALL.map(|category| {
        let count = summary
            .errors
            .iter()
            .filter(|(code, _)| ErrorCategory::of(code) == category)
            .map(|(_, count)| count)
            .sum();
        (category, count)
    })
}
