//! Type-safe enumerations for submission classification.
//!
//! Submissions arrive with Chinese labels in file names, sheet names and
//! caller selections. These enums carry the canonical label as their string
//! form and accept both the Chinese label and a short English code on parse.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Top-level classification of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentKind {
    /// Question/answer pairs (问答对).
    #[serde(rename = "问答对")]
    Qa,
    /// Exam-style exercises (习题库).
    #[serde(rename = "习题库")]
    Exercise,
}

impl ContentKind {
    /// Canonical label as stored alongside datasets.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Qa => "问答对",
            ContentKind::Exercise => "习题库",
        }
    }

    /// Short ASCII code used on the command line and in file names.
    pub fn code(&self) -> &'static str {
        match self {
            ContentKind::Qa => "qa",
            ContentKind::Exercise => "exercise",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "qa" | "问答对" | "问答" => Ok(ContentKind::Qa),
            "exercise" | "exercises" | "习题库" | "习题" => Ok(ContentKind::Exercise),
            _ => Err(ModelError::UnknownKind(s.to_string())),
        }
    }
}

/// Exercise subtype.
///
/// Declaration order is the reporting order used for per-type counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExerciseType {
    #[serde(rename = "选择题")]
    Choice,
    #[serde(rename = "填空题")]
    FillBlank,
    #[serde(rename = "简答题")]
    ShortAnswer,
    #[serde(rename = "论述题")]
    Essay,
    #[serde(rename = "案例分析题")]
    Case,
    #[serde(rename = "判断题")]
    Judgement,
}

impl ExerciseType {
    pub const ALL: [ExerciseType; 6] = [
        ExerciseType::Choice,
        ExerciseType::FillBlank,
        ExerciseType::ShortAnswer,
        ExerciseType::Essay,
        ExerciseType::Case,
        ExerciseType::Judgement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseType::Choice => "选择题",
            ExerciseType::FillBlank => "填空题",
            ExerciseType::ShortAnswer => "简答题",
            ExerciseType::Essay => "论述题",
            ExerciseType::Case => "案例分析题",
            ExerciseType::Judgement => "判断题",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ExerciseType::Choice => "choice",
            ExerciseType::FillBlank => "fill-blank",
            ExerciseType::ShortAnswer => "short-answer",
            ExerciseType::Essay => "essay",
            ExerciseType::Case => "case",
            ExerciseType::Judgement => "judgement",
        }
    }

    /// Open-ended subtypes graded against a reference analysis.
    pub fn is_open_ended(&self) -> bool {
        matches!(
            self,
            ExerciseType::ShortAnswer | ExerciseType::Essay | ExerciseType::Case
        )
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExerciseType {
    type Err = ModelError;

    /// Accepts the canonical label or the ASCII code (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lower = trimmed.to_lowercase();
        ExerciseType::ALL
            .into_iter()
            .find(|t| t.as_str() == trimmed || t.code() == lower)
            .ok_or_else(|| ModelError::UnknownExerciseType(s.to_string()))
    }
}

/// The type cell of a canonical exercise row.
///
/// Declared type strings that cannot be normalized to a known subtype are
/// carried verbatim rather than discarded.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExerciseTypeValue {
    Known(ExerciseType),
    Other(String),
}

impl ExerciseTypeValue {
    pub fn as_str(&self) -> &str {
        match self {
            ExerciseTypeValue::Known(t) => t.as_str(),
            ExerciseTypeValue::Other(raw) => raw,
        }
    }

    pub fn known(&self) -> Option<ExerciseType> {
        match self {
            ExerciseTypeValue::Known(t) => Some(*t),
            ExerciseTypeValue::Other(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ExerciseTypeValue::Other(raw) if raw.trim().is_empty())
    }
}

impl From<ExerciseType> for ExerciseTypeValue {
    fn from(value: ExerciseType) -> Self {
        ExerciseTypeValue::Known(value)
    }
}

impl From<String> for ExerciseTypeValue {
    fn from(value: String) -> Self {
        match value.parse::<ExerciseType>() {
            Ok(known) => ExerciseTypeValue::Known(known),
            Err(_) => ExerciseTypeValue::Other(value),
        }
    }
}

impl From<ExerciseTypeValue> for String {
    fn from(value: ExerciseTypeValue) -> Self {
        match value {
            ExerciseTypeValue::Known(t) => t.as_str().to_string(),
            ExerciseTypeValue::Other(raw) => raw,
        }
    }
}

impl fmt::Display for ExerciseTypeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Academic level of an exercise bank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    #[default]
    #[serde(rename = "本科")]
    Undergraduate,
    #[serde(rename = "研究生")]
    Graduate,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Undergraduate => "本科",
            Level::Graduate => "研究生",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Level::Undergraduate => "ug",
            Level::Graduate => "grad",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "本科" | "ug" | "undergraduate" => Ok(Level::Undergraduate),
            "研究生" | "grad" | "graduate" | "postgraduate" => Ok(Level::Graduate),
            _ => Err(ModelError::UnknownLevel(s.to_string())),
        }
    }
}
