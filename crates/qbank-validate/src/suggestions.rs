//! Fix suggestions derived from error counts.

use std::collections::BTreeMap;

use qbank_model::ContentKind;

/// Shown when no error code has a dedicated tip.
pub const FALLBACK_SUGGESTION: &str = "修复所有标红项（Error），并重新上传";

const QA_TIPS: &[(&str, &str)] = &[
    ("Q_EMPTY", "填写问题（question），避免为空"),
    ("A_EMPTY", "填写答案（answer），避免为空"),
    ("Q_GARBLED", "修复问题乱码（检查编码/非法字符）"),
    ("A_GARBLED", "修复答案乱码（检查编码/非法字符）"),
    ("Q_SHORT", "问题长度建议不少于3个字符"),
    ("A_SHORT", "答案长度过短，补充完整"),
];

const EXERCISE_TIPS: &[(&str, &str)] = &[
    ("STEM_EMPTY", "补充题干（stem）"),
    ("ANS_EMPTY", "补充答案（answer）"),
    ("OPT_EMPTY", "补充选项（options），使用格式：A: xxx\\nB: xxx"),
    ("OPT_GARBLED", "修复选项乱码（检查非法字符与编码）"),
    ("ANS_NOT_IN_OPTS", "答案需为选项字母（如 A/B/C/D），与选项一致"),
    ("ANS_INVALID", "判断题答案需在 True/False/是/否/对/错"),
    ("STEM_GARBLED", "修复题干乱码（检查编码）"),
    ("ANS_GARBLED", "修复答案乱码（检查编码）"),
    ("KN_EMPTY", "补充知识点（knowledge），关联课程章节或概念"),
    ("KN_GARBLED", "修复知识点乱码（检查编码）"),
];

fn tip_for(kind: ContentKind, code: &str) -> Option<&'static str> {
    let table = match kind {
        ContentKind::Qa => QA_TIPS,
        ContentKind::Exercise => EXERCISE_TIPS,
    };
    table
        .iter()
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, tip)| *tip)
}

/// Fix tips for the given per-code error counts, most frequent first.
pub fn suggestions_for(errors: &BTreeMap<String, usize>, kind: ContentKind) -> Vec<String> {
    let mut ranked: Vec<(&String, &usize)> = errors.iter().collect();
    // Stable sort keeps code order among equal counts.
    ranked.sort_by(|a, b| b.1.cmp(a.1));
    let tips: Vec<String> = ranked
        .into_iter()
        .filter_map(|(code, count)| tip_for(kind, code).map(|tip| format!("{tip}（问题数：{count}）")))
        .collect();
    if tips.is_empty() {
        vec![FALLBACK_SUGGESTION.to_string()]
    } else {
        tips
    }
}
