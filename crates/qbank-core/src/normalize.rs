//! Record normalization: one raw sheet in, canonical rows plus warnings out.
//!
//! Missing required columns never abort a submission. QA sheets without a
//! question or answer column contribute no rows; exercise sheets keep every
//! row with a stem and leave the gaps to quality assessment.

use tracing::debug;

use qbank_map::{resolve_columns, resolve_qa_columns};
use qbank_model::{
    CanonicalField, ExerciseRecord, ExerciseType, ExerciseTypeValue, Level, QaField, QaRecord,
    RawSheet, is_blank_cell,
};
use qbank_transform::{
    OptionColumns, clean_answer, detect_type_from_sheet_name, infer_row_type, normalize_type,
};

/// Submission-wide settings that influence per-sheet normalization.
#[derive(Debug, Clone, Copy, Default)]
pub struct SheetContext {
    /// Subtype chosen by the caller; overrides every row.
    pub declared_type: Option<ExerciseType>,
}

/// Result of normalizing one exercise sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedSheet {
    pub name: String,
    /// Rows with a non-empty stem. `exercise_type` still holds the raw type
    /// cell and `level` the default; the pipeline assigns both.
    pub rows: Vec<ExerciseRecord>,
    pub warnings: Vec<String>,
    /// Subtype named by the sheet itself, e.g. "判断题" for a sheet "判断".
    pub sheet_subtype: Option<ExerciseType>,
    pub had_type_column: bool,
}

fn missing_column(field: &str) -> String {
    format!("缺少必填列：{field}")
}

/// Trimmed cell text with `nan`/`None` placeholders read as empty.
fn cell_value(sheet: &RawSheet, row: usize, column: Option<usize>) -> String {
    let Some(column) = column else {
        return String::new();
    };
    let value = sheet.cell(row, column);
    if is_blank_cell(value) {
        String::new()
    } else {
        value.trim().to_string()
    }
}

/// Normalizes a QA sheet. Rows missing either value are dropped.
pub fn normalize_qa_sheet(sheet: &RawSheet) -> (Vec<QaRecord>, Vec<String>) {
    let mapping = resolve_qa_columns(&sheet.headers);
    let column = |field: QaField| {
        mapping
            .get(field)
            .and_then(|header| sheet.column_index(header))
    };
    let (Some(question), Some(answer)) = (column(QaField::Question), column(QaField::Answer)) else {
        debug!(sheet = %sheet.name, headers = ?sheet.headers, "QA columns unresolved");
        return (Vec::new(), vec![missing_column("question/answer")]);
    };

    let records: Vec<QaRecord> = (0..sheet.height())
        .filter_map(|row| {
            let question = cell_value(sheet, row, Some(question));
            let answer = cell_value(sheet, row, Some(answer));
            (!question.is_empty() && !answer.is_empty()).then_some(QaRecord { question, answer })
        })
        .collect();
    debug!(
        sheet = %sheet.name,
        rows = sheet.height(),
        kept = records.len(),
        "normalized QA sheet"
    );
    (records, Vec::new())
}

/// Normalizes an exercise sheet.
pub fn normalize_exercise_sheet(sheet: &RawSheet, ctx: &SheetContext) -> NormalizedSheet {
    let mapping = resolve_columns(&sheet.headers);
    let column = |field: CanonicalField| {
        mapping
            .get(field)
            .and_then(|header| sheet.column_index(header))
    };
    let stem_col = column(CanonicalField::Stem);
    let answer_col = column(CanonicalField::Answer);
    let type_col = column(CanonicalField::Type);
    let knowledge_col = column(CanonicalField::Knowledge);
    let analysis_col = column(CanonicalField::Analysis);
    let option_columns = OptionColumns::scan(&sheet.headers, &mapping);
    let sheet_subtype =
        detect_type_from_sheet_name(&sheet.name).and_then(|signal| signal.exercise_type());
    let had_type_column = type_col.is_some();

    let mut warnings = Vec::new();
    for (field, col) in [
        (CanonicalField::Stem, stem_col),
        (CanonicalField::Answer, answer_col),
    ] {
        if col.is_none_or(|idx| sheet.is_column_blank(idx)) {
            warnings.push(missing_column(field.as_str()));
        }
    }
    if !had_type_column && sheet_subtype.is_none() {
        debug!(sheet = %sheet.name, "no type column or sheet signal; row types will be inferred");
    }

    let mut rows = Vec::new();
    for (row_idx, raw_row) in sheet.rows.iter().enumerate() {
        let stem = cell_value(sheet, row_idx, stem_col);
        if stem.is_empty() {
            continue;
        }
        let type_cell = cell_value(sheet, row_idx, type_col);
        let options = option_columns.reconstruct(raw_row);
        let raw_answer = cell_value(sheet, row_idx, answer_col);
        let cleaning_type = ctx
            .declared_type
            .or_else(|| normalize_type(&type_cell).known())
            .or(sheet_subtype)
            .unwrap_or_else(|| infer_row_type(&options, &raw_answer));
        rows.push(ExerciseRecord {
            exercise_type: ExerciseTypeValue::from(type_cell),
            stem,
            answer: clean_answer(&raw_answer, Some(cleaning_type)),
            options,
            knowledge: cell_value(sheet, row_idx, knowledge_col),
            analysis: cell_value(sheet, row_idx, analysis_col),
            level: Level::default(),
        });
    }
    debug!(
        sheet = %sheet.name,
        rows = sheet.height(),
        kept = rows.len(),
        resolved = mapping.len(),
        options = !option_columns.is_none(),
        "normalized exercise sheet"
    );

    NormalizedSheet {
        name: sheet.name.clone(),
        rows,
        warnings,
        sheet_subtype,
        had_type_column,
    }
}
