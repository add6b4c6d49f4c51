//! Answer cleaning.

use std::sync::LazyLock;

use qbank_model::ExerciseType;
use regex::Regex;

/// Leading boilerplate such as `答案：`, `Answer -` or `Correct Answer:`.
static ANSWER_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:correct\s+answer|answer|答案)(?:\s*[:：\-]\s*|\s+)")
        .expect("Invalid answer prefix regex")
});

/// Characters that may follow a leading choice letter.
const LETTER_SEPARATORS: &[char] = &['.', ':', '．', '：', '、', ')', '）'];

/// Cleans a raw answer cell.
///
/// The boilerplate prefix is stripped for every type. For choice rows a
/// verbose `"A: description"` answer is reduced to its upper-cased letter;
/// multi-letter answers such as `ABC` or `A,C` are left for the assessor.
pub fn clean_answer(raw: &str, exercise_type: Option<ExerciseType>) -> String {
    let stripped = strip_answer_prefix(raw);
    if exercise_type == Some(ExerciseType::Choice)
        && let Some(letter) = leading_choice_letter(stripped)
    {
        return letter.to_string();
    }
    stripped.to_string()
}

fn strip_answer_prefix(raw: &str) -> &str {
    let trimmed = raw.trim();
    match ANSWER_PREFIX_RE.find(trimmed) {
        Some(m) => trimmed[m.end()..].trim(),
        None => trimmed,
    }
}

/// `A`, `a.`, `B: text`, `C 细胞膜`, `D线粒体` → the upper-cased letter.
///
/// A following Latin letter, digit or ASCII punctuation other than the
/// separators keeps the text whole, so `ABC`, `A,C` and `Gene` survive.
fn leading_choice_letter(text: &str) -> Option<char> {
    let mut chars = text.chars();
    let letter = chars.next()?.to_ascii_uppercase();
    if !('A'..='F').contains(&letter) {
        return None;
    }
    match chars.next() {
        None => Some(letter),
        Some(next) if next.is_whitespace() || LETTER_SEPARATORS.contains(&next) => Some(letter),
        Some(next) if next.is_alphabetic() && !next.is_ascii() => Some(letter),
        Some(_) => None,
    }
}
