//! Quality overlay types.
//!
//! Quality results are derived from a canonical frame and can always be
//! recomputed; nothing here is persisted as ground truth.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Flag severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warn,
    Info,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Error => "Error",
            Severity::Warn => "Warn",
            Severity::Info => "Info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A coded annotation on one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityFlag {
    pub severity: Severity,
    pub code: String,
    pub message: String,
}

impl QualityFlag {
    pub fn new(severity: Severity, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Renders as `Severity:CODE:message`.
impl fmt::Display for QualityFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.severity, self.code, self.message)
    }
}

/// Score and flags of one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowQuality {
    /// 0..=100.
    pub score: u8,
    pub flags: Vec<QualityFlag>,
}

impl RowQuality {
    pub fn has_severity(&self, severity: Severity) -> bool {
        self.flags.iter().any(|flag| flag.severity == severity)
    }

    pub fn has_errors(&self) -> bool {
        self.has_severity(Severity::Error)
    }

    pub fn has_warnings(&self) -> bool {
        self.has_severity(Severity::Warn)
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.flags.iter().any(|flag| flag.code == code)
    }

    /// Pipe-joined flag column value.
    pub fn render_flags(&self) -> String {
        self.flags
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("|")
    }
}

/// Dataset-level aggregate used by ingestion gating.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualitySummary {
    /// Mean row score, rounded to 2 decimals.
    pub score_avg: f64,
    /// Rows carrying at least one Error flag.
    pub error_count: usize,
    /// Rows carrying at least one Warn flag.
    pub warn_count: usize,
    /// `error_count / row_count`, rounded to 4 decimals.
    pub error_row_ratio: f64,
    pub errors: BTreeMap<String, usize>,
    pub warns: BTreeMap<String, usize>,
}

impl QualitySummary {
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }
}
