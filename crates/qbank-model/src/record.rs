//! Canonical record shapes.

use serde::{Deserialize, Serialize};

use crate::kind::{ContentKind, ExerciseTypeValue, Level};

/// Column order of the canonical QA table.
pub const QA_COLUMNS: &[&str] = &["question", "answer"];

/// Column order of the canonical exercise table.
pub const EXERCISE_COLUMNS: &[&str] = &[
    "type",
    "stem",
    "options",
    "answer",
    "knowledge",
    "analysis",
    "level",
];

/// A question/answer pair. Both fields are non-empty after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaRecord {
    pub question: String,
    pub answer: String,
}

/// An exercise row. `stem` is non-empty after normalization; `answer` may be
/// empty and is then flagged by quality assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    #[serde(rename = "type")]
    pub exercise_type: ExerciseTypeValue,
    pub stem: String,
    /// Multi-line `LABEL: text` blob, possibly empty.
    pub options: String,
    pub answer: String,
    pub knowledge: String,
    pub analysis: String,
    pub level: Level,
}

/// The normalized row set of one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "rows")]
pub enum CanonicalFrame {
    #[serde(rename = "qa")]
    Qa(Vec<QaRecord>),
    #[serde(rename = "exercise")]
    Exercise(Vec<ExerciseRecord>),
}

impl CanonicalFrame {
    pub fn empty(kind: ContentKind) -> Self {
        match kind {
            ContentKind::Qa => CanonicalFrame::Qa(Vec::new()),
            ContentKind::Exercise => CanonicalFrame::Exercise(Vec::new()),
        }
    }

    pub fn kind(&self) -> ContentKind {
        match self {
            CanonicalFrame::Qa(_) => ContentKind::Qa,
            CanonicalFrame::Exercise(_) => ContentKind::Exercise,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            CanonicalFrame::Qa(rows) => rows.len(),
            CanonicalFrame::Exercise(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Canonical column names in output order.
    pub fn column_names(&self) -> &'static [&'static str] {
        match self {
            CanonicalFrame::Qa(_) => QA_COLUMNS,
            CanonicalFrame::Exercise(_) => EXERCISE_COLUMNS,
        }
    }
}
