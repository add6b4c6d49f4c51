//! Row-level quality assessment.

use serde::{Deserialize, Serialize};
use tracing::debug;

use qbank_model::{CanonicalFrame, RowQuality};

use crate::rules::{EXERCISE_RULES, ExerciseRow, QA_RULES, QaRow, evaluate};

/// Assessment switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityOptions {
    /// Enable the `*_GARBLED` rules.
    pub garbled_check: bool,
}

/// Quality overlay for a canonical frame, index-aligned with its rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityReport {
    rows: Vec<RowQuality>,
}

impl QualityReport {
    pub fn new(rows: Vec<RowQuality>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[RowQuality] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RowQuality> {
        self.rows.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RowQuality> {
        self.rows.iter()
    }

    /// The `quality_score` column.
    pub fn scores(&self) -> Vec<u8> {
        self.rows.iter().map(|row| row.score).collect()
    }

    /// The `quality_flags` column: pipe-joined flags per row.
    pub fn flags_column(&self) -> Vec<String> {
        self.rows.iter().map(RowQuality::render_flags).collect()
    }
}

/// Scores every row of a frame. Records are read, never modified.
pub fn assess(frame: &CanonicalFrame, options: &QualityOptions) -> QualityReport {
    let rows: Vec<RowQuality> = match frame {
        CanonicalFrame::Qa(records) => records
            .iter()
            .map(|record| evaluate(QA_RULES, &QaRow::new(record), options.garbled_check))
            .collect(),
        CanonicalFrame::Exercise(records) => records
            .iter()
            .map(|record| {
                evaluate(
                    EXERCISE_RULES,
                    &ExerciseRow::new(record),
                    options.garbled_check,
                )
            })
            .collect(),
    };
    debug!(
        kind = %frame.kind(),
        rows = rows.len(),
        garbled_check = options.garbled_check,
        "assessed quality"
    );
    QualityReport::new(rows)
}

#[cfg(test)]
mod tests {
    use qbank_model::{ContentKind, QaRecord};

    use super::*;

    #[test]
    fn empty_frame_yields_empty_report() {
        let report = assess(&CanonicalFrame::empty(ContentKind::Exercise), &QualityOptions::default());
        assert!(report.is_empty());
        assert!(report.flags_column().is_empty());
    }

    #[test]
    fn columns_align_with_rows() {
        let frame = CanonicalFrame::Qa(vec![
            QaRecord {
                question: "什么是边际效用？".to_string(),
                answer: "增加一单位消费带来的效用增量".to_string(),
            },
            QaRecord {
                question: "GDP".to_string(),
                answer: "GDP".to_string(),
            },
        ]);
        let report = assess(&frame, &QualityOptions::default());
        assert_eq!(report.scores(), vec![100, 80]);
        assert_eq!(
            report.flags_column(),
            vec![String::new(), "Warn:Q_EQ_A:问题与答案相同".to_string()]
        );
        assert_eq!(report.get(1).map(|row| row.score), Some(80));
    }
}
