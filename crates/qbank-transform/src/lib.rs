//! Leaf transforms applied while normalizing question-bank sheets.
//!
//! - **detection**: content kind, exercise subtype and level detection
//! - **options**: option column reconstruction and option-label extraction
//! - **answer**: answer prefix stripping and choice-letter reduction
//! - **inference**: declared type normalization and row-level type inference

pub mod answer;
pub mod detection;
pub mod inference;
pub mod options;

pub use answer::clean_answer;
pub use detection::{
    FILL_BLANK_MAX_CHARS, SheetSignal, detect_content_kind, detect_exercise_subtype, detect_level,
    detect_type_from_sheet_name, kind_mismatch_warning,
};
pub use inference::{
    RowFeatures, TypeResolution, count_types, infer_row_type, is_judgement_answer,
    mixed_type_warning, normalize_type, resolve_row_types,
};
pub use options::{OptionColumns, extract_option_labels};
