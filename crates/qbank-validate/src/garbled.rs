//! Garbled-text heuristic.
//!
//! Off by default: formulas and LaTeX in economics and maths banks use enough
//! symbols to trip it on legitimate content.

use std::sync::LazyLock;

use regex::Regex;

/// Characters considered legitimate: word characters, CJK, whitespace,
/// common Chinese/English punctuation, math and LaTeX symbols, brackets.
static LEGITIMATE_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"[\w\x{4e00}-\x{9fa5}\s.,;，。；？！:：\-()\[\]/\\$%+=<>|{}^~@#&`【】《》“”‘’'"]"#,
    )
    .expect("Invalid legitimate-character regex")
});

/// Share of characters outside the whitelist above which text is garbled.
pub const GARBLED_RATIO: f64 = 0.3;

/// Whether more than 30% of the characters fall outside the whitelist.
pub fn is_garbled(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    let total = text.chars().count();
    let garbage = LEGITIMATE_CHARS_RE.replace_all(text, "").chars().count();
    garbage as f64 / total.max(1) as f64 > GARBLED_RATIO
}
