use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic fields a free-form exercise header can be mapped onto.
///
/// Declaration order is resolution order: earlier fields claim headers first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    Stem,
    Answer,
    Options,
    Analysis,
    Knowledge,
    Type,
    Level,
    SerialNo,
}

impl CanonicalField {
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalField::Stem => "stem",
            CanonicalField::Answer => "answer",
            CanonicalField::Options => "options",
            CanonicalField::Analysis => "analysis",
            CanonicalField::Knowledge => "knowledge",
            CanonicalField::Type => "type",
            CanonicalField::Level => "level",
            CanonicalField::SerialNo => "serial_no",
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields of a question/answer sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QaField {
    Question,
    Answer,
}

impl QaField {
    pub fn as_str(&self) -> &'static str {
        match self {
            QaField::Question => "question",
            QaField::Answer => "answer",
        }
    }
}

impl fmt::Display for QaField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
