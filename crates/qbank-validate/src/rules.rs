//! Declarative quality rule tables.
//!
//! Every check is one entry in [`QA_RULES`] or [`EXERCISE_RULES`]; a single
//! evaluator walks the table for each row. Rows start at 100 points and each
//! failing rule subtracts its deduction, flooring at 0.
//!
//! # Exercise rules
//!
//! | Code | Applies to | Severity | Deduction |
//! |---|---|---|---|
//! | STEM_EMPTY | all | Error | 50 |
//! | ANS_EMPTY | all | Error | 50 |
//! | OPT_EMPTY | 选择题 | Error | 40 |
//! | ANS_NOT_IN_OPTS | 选择题 | Error | 30 |
//! | ANS_INVALID | 判断题 | Error | 30 |
//! | ANS_SHORT | 填空题 | Error | 20 |
//! | AN_EQ_ANS | open-ended or unrecognised | Info | 10 |
//! | KN_EMPTY | all | Error | 20 |
//!
//! Garbled-text rules (`*_GARBLED`) are only consulted when enabled.

use std::collections::BTreeSet;
use std::fmt;

use qbank_model::{
    ExerciseRecord, ExerciseType, ExerciseTypeValue, QaRecord, QualityFlag, RowQuality, Severity,
    is_blank_cell,
};
use qbank_transform::{extract_option_labels, normalize_type};

use crate::garbled::is_garbled;

/// Answers accepted for judgement rows, compared upper-cased.
pub const JUDGEMENT_VALID_ANSWERS: &[&str] = &[
    "TRUE", "FALSE", "T", "F", "是", "否", "对", "错", "正确", "错误", "√", "×",
];

/// Which rows a rule is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppliesTo {
    /// Every row.
    All,
    /// Rows of one exercise subtype.
    Only(ExerciseType),
    /// Short-answer, essay and case rows, plus rows whose type is not one of
    /// the six subtypes.
    OpenEndedOrOther,
}

impl AppliesTo {
    pub fn matches(&self, row_type: Option<&ExerciseTypeValue>) -> bool {
        match self {
            AppliesTo::All => true,
            AppliesTo::Only(expected) => row_type.and_then(ExerciseTypeValue::known) == Some(*expected),
            AppliesTo::OpenEndedOrOther => row_type.is_some_and(|value| {
                value
                    .known()
                    .is_none_or(|exercise_type| exercise_type.is_open_ended())
            }),
        }
    }
}

impl fmt::Display for AppliesTo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppliesTo::All => f.write_str("全部"),
            AppliesTo::Only(exercise_type) => write!(f, "{exercise_type}"),
            AppliesTo::OpenEndedOrOther => f.write_str("简答题/论述题/案例分析题/其他"),
        }
    }
}

/// Row view a rule table is evaluated against.
pub trait RuleSubject {
    /// Normalized exercise type; `None` for QA rows.
    fn row_type(&self) -> Option<&ExerciseTypeValue> {
        None
    }
}

/// One quality rule.
pub struct QualityRule<R> {
    pub code: &'static str,
    pub severity: Severity,
    pub deduction: u8,
    pub message: &'static str,
    pub applies_to: AppliesTo,
    /// Only evaluated when the garbled-text check is enabled.
    pub garbled: bool,
    /// Returns true when the row violates the rule.
    pub violated: fn(&R) -> bool,
}

impl<R> QualityRule<R> {
    pub fn flag(&self) -> QualityFlag {
        QualityFlag::new(self.severity, self.code, self.message)
    }
}

/// Trimmed view of a QA record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QaRow {
    pub question: String,
    pub answer: String,
}

impl QaRow {
    pub fn new(record: &QaRecord) -> Self {
        Self {
            question: clean(&record.question),
            answer: clean(&record.answer),
        }
    }
}

impl RuleSubject for QaRow {}

/// Trimmed view of an exercise record with its normalized type and the
/// option labels found in its options blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseRow {
    pub exercise_type: ExerciseTypeValue,
    pub stem: String,
    pub options: String,
    pub labels: BTreeSet<char>,
    pub answer: String,
    pub knowledge: String,
    pub analysis: String,
}

impl ExerciseRow {
    pub fn new(record: &ExerciseRecord) -> Self {
        let options = clean(&record.options);
        let labels = extract_option_labels(&options);
        Self {
            exercise_type: normalize_type(record.exercise_type.as_str()),
            stem: clean(&record.stem),
            options,
            labels,
            answer: clean(&record.answer),
            knowledge: clean(&record.knowledge),
            analysis: clean(&record.analysis),
        }
    }

    /// Upper-cased ASCII letters of the answer, e.g. `"a, c"` → `"AC"`.
    fn answer_letters(&self) -> String {
        self.answer
            .to_uppercase()
            .chars()
            .filter(char::is_ascii_uppercase)
            .collect()
    }
}

impl RuleSubject for ExerciseRow {
    fn row_type(&self) -> Option<&ExerciseTypeValue> {
        Some(&self.exercise_type)
    }
}

fn clean(value: &str) -> String {
    if is_blank_cell(value) {
        String::new()
    } else {
        value.trim().to_string()
    }
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

// =============================================================================
// QA rules
// =============================================================================

pub const QA_RULES: &[QualityRule<QaRow>] = &[
    QualityRule {
        code: "Q_EMPTY",
        severity: Severity::Error,
        deduction: 50,
        message: "问题为空",
        applies_to: AppliesTo::All,
        garbled: false,
        violated: |row| row.question.is_empty(),
    },
    QualityRule {
        code: "A_EMPTY",
        severity: Severity::Error,
        deduction: 50,
        message: "答案为空",
        applies_to: AppliesTo::All,
        garbled: false,
        violated: |row| row.answer.is_empty(),
    },
    QualityRule {
        code: "Q_SHORT",
        severity: Severity::Warn,
        deduction: 15,
        message: "问题过短",
        applies_to: AppliesTo::All,
        garbled: false,
        violated: |row| char_len(&row.question) < 3,
    },
    QualityRule {
        code: "A_SHORT",
        severity: Severity::Warn,
        deduction: 15,
        message: "答案过短",
        applies_to: AppliesTo::All,
        garbled: false,
        violated: |row| char_len(&row.answer) < 1,
    },
    QualityRule {
        code: "Q_EQ_A",
        severity: Severity::Warn,
        deduction: 20,
        message: "问题与答案相同",
        applies_to: AppliesTo::All,
        garbled: false,
        violated: |row| !row.question.is_empty() && row.question == row.answer,
    },
    QualityRule {
        code: "Q_GARBLED",
        severity: Severity::Error,
        deduction: 20,
        message: "问题疑似乱码",
        applies_to: AppliesTo::All,
        garbled: true,
        violated: |row| is_garbled(&row.question),
    },
    QualityRule {
        code: "A_GARBLED",
        severity: Severity::Error,
        deduction: 20,
        message: "答案疑似乱码",
        applies_to: AppliesTo::All,
        garbled: true,
        violated: |row| is_garbled(&row.answer),
    },
];

// =============================================================================
// Exercise rules
// =============================================================================

pub const EXERCISE_RULES: &[QualityRule<ExerciseRow>] = &[
    QualityRule {
        code: "STEM_EMPTY",
        severity: Severity::Error,
        deduction: 50,
        message: "题干为空",
        applies_to: AppliesTo::All,
        garbled: false,
        violated: |row| row.stem.is_empty(),
    },
    QualityRule {
        code: "ANS_EMPTY",
        severity: Severity::Error,
        deduction: 50,
        message: "答案为空",
        applies_to: AppliesTo::All,
        garbled: false,
        violated: |row| row.answer.is_empty(),
    },
    QualityRule {
        code: "STEM_GARBLED",
        severity: Severity::Error,
        deduction: 20,
        message: "题干疑似乱码",
        applies_to: AppliesTo::All,
        garbled: true,
        violated: |row| is_garbled(&row.stem),
    },
    QualityRule {
        code: "ANS_GARBLED",
        severity: Severity::Error,
        deduction: 20,
        message: "答案疑似乱码",
        applies_to: AppliesTo::All,
        garbled: true,
        violated: |row| is_garbled(&row.answer),
    },
    QualityRule {
        code: "OPT_EMPTY",
        severity: Severity::Error,
        deduction: 40,
        message: "选项缺失",
        applies_to: AppliesTo::Only(ExerciseType::Choice),
        garbled: false,
        violated: |row| row.labels.is_empty(),
    },
    QualityRule {
        code: "OPT_GARBLED",
        severity: Severity::Error,
        deduction: 20,
        message: "选项疑似乱码",
        applies_to: AppliesTo::Only(ExerciseType::Choice),
        garbled: true,
        violated: |row| !row.labels.is_empty() && is_garbled(&row.options),
    },
    QualityRule {
        code: "ANS_NOT_IN_OPTS",
        severity: Severity::Error,
        deduction: 30,
        message: "答案不在选项中",
        applies_to: AppliesTo::Only(ExerciseType::Choice),
        garbled: false,
        violated: |row| {
            let letters = row.answer_letters();
            !letters.is_empty() && !letters.chars().all(|letter| row.labels.contains(&letter))
        },
    },
    QualityRule {
        code: "ANS_INVALID",
        severity: Severity::Error,
        deduction: 30,
        message: "判断题答案不合法",
        applies_to: AppliesTo::Only(ExerciseType::Judgement),
        garbled: false,
        violated: |row| !JUDGEMENT_VALID_ANSWERS.contains(&row.answer.to_uppercase().as_str()),
    },
    QualityRule {
        code: "ANS_SHORT",
        severity: Severity::Error,
        deduction: 20,
        message: "填空题答案过短",
        applies_to: AppliesTo::Only(ExerciseType::FillBlank),
        garbled: false,
        violated: |row| char_len(&row.answer) < 1,
    },
    QualityRule {
        code: "AN_EQ_ANS",
        severity: Severity::Info,
        deduction: 10,
        message: "解析与答案相同",
        applies_to: AppliesTo::OpenEndedOrOther,
        garbled: false,
        violated: |row| !row.analysis.is_empty() && row.analysis == row.answer,
    },
    QualityRule {
        code: "KN_EMPTY",
        severity: Severity::Error,
        deduction: 20,
        message: "知识点缺失",
        applies_to: AppliesTo::All,
        garbled: false,
        violated: |row| row.knowledge.is_empty(),
    },
    QualityRule {
        code: "KN_GARBLED",
        severity: Severity::Error,
        deduction: 10,
        message: "知识点疑似乱码",
        applies_to: AppliesTo::All,
        garbled: true,
        violated: |row| !row.knowledge.is_empty() && is_garbled(&row.knowledge),
    },
];

/// Evaluates a rule table against one row.
pub fn evaluate<R: RuleSubject>(rules: &[QualityRule<R>], row: &R, garbled_check: bool) -> RowQuality {
    let mut deducted: u32 = 0;
    let mut flags = Vec::new();
    for rule in rules {
        if rule.garbled && !garbled_check {
            continue;
        }
        if !rule.applies_to.matches(row.row_type()) {
            continue;
        }
        if (rule.violated)(row) {
            deducted += u32::from(rule.deduction);
            flags.push(rule.flag());
        }
    }
    let score = 100u32.saturating_sub(deducted);
    RowQuality {
        score: u8::try_from(score).unwrap_or(0),
        flags,
    }
}
