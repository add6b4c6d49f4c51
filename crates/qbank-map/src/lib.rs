//! Semantic column mapping for free-form spreadsheet headers.

pub mod aliases;
pub mod lookup;
pub mod resolver;

pub use aliases::{AliasRule, EXERCISE_ALIASES, QA_ALIASES};
pub use lookup::HeaderLookup;
pub use resolver::{ColumnMapping, resolve_columns, resolve_qa_columns, resolve_with};
