//! Submission processing: detection, normalization, type assignment and
//! quality assessment in one stateless pass.

use std::collections::BTreeMap;
use std::time::Instant;

use tracing::{debug, info, info_span};

use qbank_model::{
    CanonicalFrame, ContentKind, ExerciseRecord, ExerciseType, ExerciseTypeValue, Level, QaRecord,
    SheetSet, SubmissionMetadata,
};
use qbank_transform::{
    count_types, detect_content_kind, detect_exercise_subtype, detect_level,
    kind_mismatch_warning, mixed_type_warning, resolve_row_types,
};
use qbank_validate::{QualityOptions, QualityReport, assess, summarize};

use crate::error::{PipelineError, Result};
use crate::normalize::{NormalizedSheet, SheetContext, normalize_exercise_sheet, normalize_qa_sheet};

/// Caller choices that override detection.
#[derive(Debug, Clone, Copy, Default)]
pub struct IngestOptions {
    pub declared_kind: Option<ContentKind>,
    pub exercise_type: Option<ExerciseType>,
    pub level: Option<Level>,
    pub quality: QualityOptions,
}

/// Everything produced for one submission.
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    pub metadata: SubmissionMetadata,
    pub frame: CanonicalFrame,
    /// Index-aligned with the frame's rows; empty when the frame is.
    pub quality: QualityReport,
    pub warnings: Vec<String>,
}

/// Exercise-specific metadata gathered while building the frame.
#[derive(Debug, Default)]
struct ExerciseFacts {
    subtype: Option<ExerciseType>,
    level: Option<Level>,
    detected_level: Option<Level>,
    mixed_types: Option<BTreeMap<ExerciseTypeValue, usize>>,
}

fn prefixed(sheet: &str, warnings: impl IntoIterator<Item = String>) -> Vec<String> {
    warnings
        .into_iter()
        .map(|warning| format!("[{sheet}] {warning}"))
        .collect()
}

/// Processes a decoded submission.
///
/// Never mutates its input and keeps no state between calls.
pub fn process_submission(sheet_set: &SheetSet, options: &IngestOptions) -> Result<IngestOutcome> {
    if sheet_set.sheets.is_empty() {
        return Err(PipelineError::NoSheets {
            filename: sheet_set.filename.clone(),
        });
    }
    let span = info_span!("submission", filename = %sheet_set.filename);
    let _guard = span.enter();
    let start = Instant::now();

    // =========================================================================
    // Stage 1: Detect content kind
    // =========================================================================
    let sheet_names = sheet_set.sheet_names();
    let detected_kind = detect_content_kind(&sheet_set.sheets);
    let kind = options.declared_kind.unwrap_or(detected_kind);
    debug!(%detected_kind, %kind, sheets = sheet_names.len(), "content kind resolved");

    // =========================================================================
    // Stage 2: Normalize sheets and assign exercise types
    // =========================================================================
    let mut warnings = Vec::new();
    let (frame, facts) = match kind {
        ContentKind::Qa => {
            let mut rows: Vec<QaRecord> = Vec::new();
            for sheet in &sheet_set.sheets {
                let (sheet_rows, sheet_warnings) = normalize_qa_sheet(sheet);
                warnings.extend(prefixed(&sheet.name, sheet_warnings));
                rows.extend(sheet_rows);
            }
            (CanonicalFrame::Qa(rows), ExerciseFacts::default())
        }
        ContentKind::Exercise => {
            let (rows, facts) = build_exercises(sheet_set, &sheet_names, options, &mut warnings);
            (CanonicalFrame::Exercise(rows), facts)
        }
    };

    // =========================================================================
    // Stage 3: Consistency warnings
    // =========================================================================
    if let Some(declared) = options.declared_kind
        && let Some(warning) = kind_mismatch_warning(declared, detected_kind)
    {
        for name in &sheet_names {
            warnings.push(format!("[{name}] {warning}"));
        }
    }

    // =========================================================================
    // Stage 4: Quality assessment
    // =========================================================================
    let (quality, quality_summary) = if frame.is_empty() {
        (QualityReport::default(), None)
    } else {
        let report = assess(&frame, &options.quality);
        let summary = summarize(&report);
        (report, Some(summary))
    };

    let metadata = SubmissionMetadata {
        filename: sheet_set.filename.clone(),
        sheets: sheet_names,
        columns: if frame.is_empty() {
            Vec::new()
        } else {
            frame.column_names().iter().map(ToString::to_string).collect()
        },
        total: frame.len(),
        declared_kind: options.declared_kind,
        detected_kind,
        kind,
        exercise_type: facts.subtype,
        level: facts.level,
        detected_level: facts.detected_level,
        quality_summary,
        mixed_types: facts.mixed_types,
        digest: sheet_set.digest.clone(),
    };

    info!(
        %kind,
        rows = metadata.total,
        warnings = warnings.len(),
        error_row_ratio = metadata
            .quality_summary
            .as_ref()
            .map_or(0.0, |summary| summary.error_row_ratio),
        duration_ms = start.elapsed().as_millis(),
        "submission processed"
    );

    Ok(IngestOutcome {
        metadata,
        frame,
        quality,
        warnings,
    })
}

fn build_exercises(
    sheet_set: &SheetSet,
    sheet_names: &[String],
    options: &IngestOptions,
    warnings: &mut Vec<String>,
) -> (Vec<ExerciseRecord>, ExerciseFacts) {
    let ctx = SheetContext {
        declared_type: options.exercise_type,
    };
    let mut rows: Vec<ExerciseRecord> = Vec::new();
    // Per-row types as found in the data, before any declared subtype is
    // applied. Mixed-type detection runs on these.
    let mut observed: Vec<ExerciseTypeValue> = Vec::new();
    for sheet in &sheet_set.sheets {
        let NormalizedSheet {
            name,
            rows: mut sheet_rows,
            warnings: sheet_warnings,
            sheet_subtype,
            had_type_column,
        } = normalize_exercise_sheet(sheet, &ctx);
        warnings.extend(prefixed(&name, sheet_warnings));
        let inferred = assign_types(&mut sheet_rows, sheet_subtype, had_type_column);
        observed.extend(sheet_rows.iter().map(|row| row.exercise_type.clone()));
        if let Some(declared) = options.exercise_type {
            for row in &mut sheet_rows {
                row.exercise_type = declared.into();
            }
        }
        debug!(
            sheet = %name,
            rows = sheet_rows.len(),
            had_type_column,
            sheet_subtype = ?sheet_subtype,
            inferred,
            "exercise types assigned"
        );
        rows.extend(sheet_rows);
    }

    let subtype = options.exercise_type.unwrap_or_else(|| {
        detect_exercise_subtype(
            sheet_names,
            rows.iter().map(|row| (row.options.as_str(), row.answer.as_str())),
        )
    });
    let (level, detected_level) = match options.level {
        Some(level) => (level, None),
        None => {
            let detected = detect_level(sheet_names);
            (detected, Some(detected))
        }
    };
    for row in &mut rows {
        row.level = level;
    }

    let counts = count_types(&observed);
    let mixed_types = mixed_type_warning(&counts).map(|warning| {
        warnings.push(warning);
        counts
    });

    let facts = ExerciseFacts {
        subtype: Some(subtype),
        level: Some(level),
        detected_level,
        mixed_types,
    };
    (rows, facts)
}

/// Assigns the type found in the data to every row of one sheet. Returns
/// how many rows were classified by content inference.
fn assign_types(
    rows: &mut [ExerciseRecord],
    sheet_subtype: Option<ExerciseType>,
    had_type_column: bool,
) -> usize {
    if !had_type_column && let Some(subtype) = sheet_subtype {
        for row in rows.iter_mut() {
            row.exercise_type = subtype.into();
        }
        return 0;
    }
    let resolution = resolve_row_types(
        rows.iter()
            .map(|row| (&row.exercise_type, row.options.as_str(), row.answer.as_str())),
        had_type_column,
    );
    for (row, resolved) in rows.iter_mut().zip(resolution.types) {
        row.exercise_type = resolved;
    }
    resolution.inferred
}
