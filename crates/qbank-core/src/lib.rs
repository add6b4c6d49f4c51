//! Question-bank ingestion pipeline.
//!
//! [`process_submission`] turns a decoded [`qbank_model::SheetSet`] into a
//! canonical frame, its metadata, advisory warnings and a quality overlay.
//! [`frame::to_dataframe`] exports the result for storage.

pub mod error;
pub mod frame;
pub mod normalize;
pub mod pipeline;

pub use error::{PipelineError, Result};
pub use frame::{QUALITY_FLAGS_COLUMN, QUALITY_SCORE_COLUMN, to_dataframe};
pub use normalize::{NormalizedSheet, SheetContext, normalize_exercise_sheet, normalize_qa_sheet};
pub use pipeline::{IngestOptions, IngestOutcome, process_submission};
