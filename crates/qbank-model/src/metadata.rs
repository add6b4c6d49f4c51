use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::kind::{ContentKind, ExerciseType, ExerciseTypeValue, Level};
use crate::quality::QualitySummary;

/// Everything the storage and UI layers need to know about one parsed
/// submission besides its rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionMetadata {
    pub filename: String,
    pub sheets: Vec<String>,
    /// Canonical column names; empty when no rows survived normalization.
    pub columns: Vec<String>,
    pub total: usize,
    /// Kind chosen by the caller, if any.
    pub declared_kind: Option<ContentKind>,
    /// Kind inferred from sheet names and headers.
    pub detected_kind: ContentKind,
    /// Kind the rows were normalized under.
    pub kind: ContentKind,
    /// Declared or detected subtype (exercise submissions only).
    pub exercise_type: Option<ExerciseType>,
    /// Level applied to the rows (exercise submissions only).
    pub level: Option<Level>,
    /// Level found by detection; `None` when the caller supplied one.
    pub detected_level: Option<Level>,
    pub quality_summary: Option<QualitySummary>,
    /// Per-type row counts when more than one type is present.
    pub mixed_types: Option<BTreeMap<ExerciseTypeValue, usize>>,
    pub digest: Option<String>,
}

impl SubmissionMetadata {
    /// True when the caller declared a kind that detection disagrees with.
    pub fn kind_mismatch(&self) -> bool {
        self.declared_kind
            .is_some_and(|declared| declared != self.detected_kind)
    }
}
