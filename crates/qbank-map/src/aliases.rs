//! Header alias tables.
//!
//! Each table lists fields in resolution order; each field lists its aliases
//! in priority order. Matching is case-insensitive after trimming.

use qbank_model::{CanonicalField, QaField};

/// One field and the header spellings that supply it.
#[derive(Debug, Clone, Copy)]
pub struct AliasRule<F: 'static> {
    pub field: F,
    pub aliases: &'static [&'static str],
}

pub const EXERCISE_ALIASES: &[AliasRule<CanonicalField>] = &[
    AliasRule {
        field: CanonicalField::Stem,
        aliases: &[
            "stem", "题干", "问题", "题目", "question", "题面", "试题", "问题描述", "题目内容",
            "content", "内容", "q",
        ],
    },
    AliasRule {
        field: CanonicalField::Answer,
        aliases: &[
            "answer",
            "答案",
            "正确答案",
            "参考答案",
            "标准答案",
            "答",
            "correct answer",
            "key",
            "a",
        ],
    },
    AliasRule {
        field: CanonicalField::Options,
        aliases: &["options", "选项", "备选项", "选项内容", "choices", "option"],
    },
    AliasRule {
        field: CanonicalField::Analysis,
        aliases: &[
            "analysis",
            "解析",
            "答案解析",
            "试题解析",
            "解释",
            "explanation",
            "说明",
            "分析",
        ],
    },
    AliasRule {
        field: CanonicalField::Knowledge,
        aliases: &[
            "knowledge",
            "知识点",
            "相关知识点",
            "考点",
            "knowledge_points",
            "knowledge point",
            "知识点名称",
            "章节",
        ],
    },
    AliasRule {
        field: CanonicalField::Type,
        aliases: &[
            "type",
            "题型",
            "题目类型",
            "试题类型",
            "类型",
            "question type",
            "question_type",
        ],
    },
    AliasRule {
        field: CanonicalField::Level,
        aliases: &["level", "层次", "级别", "学历层次", "适用层次"],
    },
    AliasRule {
        field: CanonicalField::SerialNo,
        aliases: &["serial_no", "序号", "编号", "题号", "no", "id"],
    },
];

/// Narrower table for QA sheets. Exercise-only spellings such as `题干` are
/// absent so an exercise sheet read as QA reports its missing columns.
pub const QA_ALIASES: &[AliasRule<QaField>] = &[
    AliasRule {
        field: QaField::Question,
        aliases: &["question", "问题", "问", "提问", "q"],
    },
    AliasRule {
        field: QaField::Answer,
        aliases: &["answer", "答案", "答", "回答", "参考答案", "a"],
    },
];

/// Substrings that mark a header as a stem when no alias matched.
pub const STEM_HINTS: &[&str] = &["题目", "问题"];

/// Substrings that disqualify a header from the stem heuristic.
pub const STEM_HINT_EXCLUSIONS: &[&str] = &["类型", "解析", "选项"];
