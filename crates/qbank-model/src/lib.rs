//! Data model for question-bank submissions.
//!
//! Types shared by every stage of the ingestion pipeline:
//!
//! - **Content classification**: [`ContentKind`], [`ExerciseType`], [`Level`]
//! - **Column semantics**: [`CanonicalField`], [`QaField`]
//! - **Input tables**: [`RawSheet`], [`SheetSet`]
//! - **Canonical output**: [`QaRecord`], [`ExerciseRecord`], [`CanonicalFrame`]
//! - **Quality overlay**: [`Severity`], [`QualityFlag`], [`RowQuality`], [`QualitySummary`]
//! - **Submission metadata**: [`SubmissionMetadata`]

pub mod error;
pub mod field;
pub mod kind;
pub mod metadata;
pub mod quality;
pub mod record;
pub mod sheet;

pub use error::{ModelError, Result};
pub use field::{CanonicalField, QaField};
pub use kind::{ContentKind, ExerciseType, ExerciseTypeValue, Level};
pub use metadata::SubmissionMetadata;
pub use quality::{QualityFlag, QualitySummary, RowQuality, Severity};
pub use record::{CanonicalFrame, EXERCISE_COLUMNS, ExerciseRecord, QA_COLUMNS, QaRecord};
pub use sheet::{RawSheet, SheetSet, is_blank_cell};
