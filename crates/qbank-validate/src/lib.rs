//! Quality assessment for normalized question banks.
//!
//! - **rules**: declarative per-kind rule tables and their evaluator
//! - **garbled**: opt-in garbled-text heuristic
//! - **assess**: frame-level assessment producing a [`QualityReport`]
//! - **summary**: dataset aggregate used for gating
//! - **gate**: acceptance decision
//! - **suggestions**: fix tips keyed by error code

pub mod assess;
pub mod gate;
pub mod garbled;
pub mod rules;
pub mod suggestions;
pub mod summary;

pub use assess::{QualityOptions, QualityReport, assess};
pub use gate::{
    DEFAULT_ERROR_RATIO_THRESHOLD, GateDecision, GatePolicy, GateReason, evaluate_gate,
};
pub use garbled::{GARBLED_RATIO, is_garbled};
pub use rules::{
    AppliesTo, EXERCISE_RULES, ExerciseRow, JUDGEMENT_VALID_ANSWERS, QA_RULES, QaRow,
    QualityRule, RuleSubject, evaluate,
};
pub use suggestions::{FALLBACK_SUGGESTION, suggestions_for};
pub use summary::{ErrorCategory, error_categories, summarize};
