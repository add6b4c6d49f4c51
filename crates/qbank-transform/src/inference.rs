//! Exercise type normalization and row-level type inference.
//!
//! Declared type cells are free text ("单选", "Multiple choice (多选)",
//! "TRUE/FALSE"). [`normalize_type`] maps them onto the six canonical
//! subtypes; anything unrecognised is kept verbatim.
//!
//! When no usable type is declared, each row is classified from its content
//! by an ordered predicate chain:
//!
//! 1. option labels present → 选择题
//! 2. answer is a true/false keyword → 判断题
//! 3. answer of 1 to 12 characters → 填空题
//! 4. otherwise → 简答题

use std::collections::BTreeMap;

use qbank_model::{ExerciseType, ExerciseTypeValue};
use tracing::debug;

use crate::detection::FILL_BLANK_MAX_CHARS;
use crate::options::extract_option_labels;

/// Keyword table for declared type cells, matched against the upper-cased
/// text. First hit wins.
const TYPE_KEYWORDS: &[(&[&str], ExerciseType)] = &[
    (&["选择", "单选", "多选"], ExerciseType::Choice),
    (&["判断", "TRUE/FALSE", "TF"], ExerciseType::Judgement),
    (&["填空"], ExerciseType::FillBlank),
    (&["论述"], ExerciseType::Essay),
    (&["案例"], ExerciseType::Case),
    (&["简答", "计算", "名词"], ExerciseType::ShortAnswer),
];

/// Lower-cased answers that mark a judgement row during inference.
const JUDGEMENT_ANSWERS: &[&str] = &["true", "false", "t", "f", "是", "否", "对", "错"];

/// Maps a declared type cell onto a canonical subtype, or keeps the trimmed
/// text when no keyword matches. An empty cell stays empty.
pub fn normalize_type(raw: &str) -> ExerciseTypeValue {
    let trimmed = raw.trim();
    let upper = trimmed.to_uppercase();
    TYPE_KEYWORDS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|kw| upper.contains(kw)))
        .map(|(_, exercise_type)| ExerciseTypeValue::Known(*exercise_type))
        .unwrap_or_else(|| ExerciseTypeValue::Other(trimmed.to_string()))
}

/// Whether an answer is one of the true/false keywords used for inference.
pub fn is_judgement_answer(answer: &str) -> bool {
    let lower = answer.trim().to_lowercase();
    JUDGEMENT_ANSWERS.contains(&lower.as_str())
}

/// Content features of one row consulted by the inference chain.
#[derive(Debug, Clone, Copy)]
pub struct RowFeatures<'a> {
    pub options: &'a str,
    pub answer: &'a str,
}

type Predicate = fn(&RowFeatures<'_>) -> bool;

/// Ordered inference chain; the first predicate that holds decides.
const INFERENCE_CHAIN: &[(Predicate, ExerciseType)] = &[
    (has_options, ExerciseType::Choice),
    (has_judgement_answer, ExerciseType::Judgement),
    (has_short_answer, ExerciseType::FillBlank),
];

fn has_options(row: &RowFeatures<'_>) -> bool {
    !extract_option_labels(row.options).is_empty()
}

fn has_judgement_answer(row: &RowFeatures<'_>) -> bool {
    is_judgement_answer(row.answer)
}

fn has_short_answer(row: &RowFeatures<'_>) -> bool {
    let len = row.answer.trim().chars().count();
    len > 0 && len <= FILL_BLANK_MAX_CHARS
}

/// Classifies a row from its options blob and answer.
pub fn infer_row_type(options: &str, answer: &str) -> ExerciseType {
    let features = RowFeatures { options, answer };
    INFERENCE_CHAIN
        .iter()
        .find(|(predicate, _)| predicate(&features))
        .map_or(ExerciseType::ShortAnswer, |(_, exercise_type)| *exercise_type)
}

/// Per-row types for one sheet and how many of them were inferred.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeResolution {
    pub types: Vec<ExerciseTypeValue>,
    pub inferred: usize,
}

/// Resolves the type of each `(declared, options, answer)` row.
///
/// With a type column, a non-empty normalized declared type is kept and
/// blanks are inferred. Without one every row is inferred.
pub fn resolve_row_types<'a, I>(rows: I, had_type_column: bool) -> TypeResolution
where
    I: IntoIterator<Item = (&'a ExerciseTypeValue, &'a str, &'a str)>,
{
    let mut resolution = TypeResolution::default();
    for (declared, options, answer) in rows {
        let normalized = normalize_type(declared.as_str());
        if had_type_column && !normalized.is_empty() {
            resolution.types.push(normalized);
        } else {
            resolution.inferred += 1;
            resolution.types.push(infer_row_type(options, answer).into());
        }
    }
    debug!(
        rows = resolution.types.len(),
        inferred = resolution.inferred,
        had_type_column,
        "row types resolved"
    );
    resolution
}

/// Row count per type, in type order.
pub fn count_types<'a, I>(types: I) -> BTreeMap<ExerciseTypeValue, usize>
where
    I: IntoIterator<Item = &'a ExerciseTypeValue>,
{
    let mut counts = BTreeMap::new();
    for exercise_type in types {
        *counts.entry(exercise_type.clone()).or_insert(0) += 1;
    }
    counts
}

/// Advisory warning listing per-type counts when more than one type occurs.
pub fn mixed_type_warning(counts: &BTreeMap<ExerciseTypeValue, usize>) -> Option<String> {
    if counts.len() <= 1 {
        return None;
    }
    let parts = counts
        .iter()
        .map(|(exercise_type, count)| format!("{exercise_type}{count}条"))
        .collect::<Vec<_>>()
        .join(", ");
    Some(format!("检测到混合题型：{parts}"))
}
