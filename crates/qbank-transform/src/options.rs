//! Option reconstruction and option-label extraction.
//!
//! Choice questions arrive either with one combined options column or with
//! one column per option (`A`..`F`, `选项A`..). Both are reduced to a single
//! newline-separated `LABEL: text` blob.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use qbank_map::ColumnMapping;
use qbank_model::{CanonicalField, is_blank_cell};
use regex::Regex;

/// Boundary-aware option label pattern.
///
/// A label is A-G preceded by start-of-text or a character that cannot be part
/// of a word, unit or path (so `P/E`, `R_f` and `Pre-E` do not count).
/// Upper-case labels may be followed by a separator or whitespace; lower-case
/// labels need an explicit separator.
static OPTION_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:^|[^a-zA-Z0-9_\-/])(?:([A-G])(?:\s*[.:：、)）\]．]|\s+)|([a-g])\s*[.:：、)）\]．])",
    )
    .expect("Invalid option label regex")
});

/// Option labels (upper-cased) mentioned in an options blob.
pub fn extract_option_labels(text: &str) -> BTreeSet<char> {
    OPTION_LABEL_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .filter_map(|m| m.as_str().chars().next())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Where a sheet's options come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionColumns {
    /// A single column already holding the whole options blob.
    Combined(usize),
    /// One column per option label, sorted by label.
    PerLabel(Vec<(char, usize)>),
    None,
}

impl OptionColumns {
    /// Locates option columns for a sheet.
    ///
    /// A combined column resolved by the alias table wins. Otherwise headers
    /// that are a bare letter A-F or `选项` plus one letter are collected,
    /// skipping headers the mapping already assigned to another field.
    pub fn scan<S: AsRef<str>>(headers: &[S], mapping: &ColumnMapping<CanonicalField>) -> Self {
        if let Some(header) = mapping.get(CanonicalField::Options)
            && let Some(idx) = headers.iter().position(|h| h.as_ref() == header)
        {
            return OptionColumns::Combined(idx);
        }
        let mut labelled: Vec<(char, usize)> = headers
            .iter()
            .enumerate()
            .filter(|(_, header)| !mapping.is_claimed(header.as_ref()))
            .filter_map(|(idx, header)| option_label(header.as_ref()).map(|label| (label, idx)))
            .collect();
        labelled.sort_by_key(|(label, _)| *label);
        labelled.dedup_by_key(|(label, _)| *label);
        if labelled.is_empty() {
            OptionColumns::None
        } else {
            OptionColumns::PerLabel(labelled)
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, OptionColumns::None)
    }

    /// Builds the options blob for one row.
    pub fn reconstruct(&self, row: &[String]) -> String {
        let cell = |idx: usize| row.get(idx).map(|v| v.trim()).unwrap_or("");
        match self {
            OptionColumns::Combined(idx) => {
                let value = cell(*idx);
                if is_blank_cell(value) {
                    String::new()
                } else {
                    value.to_string()
                }
            }
            OptionColumns::PerLabel(columns) => columns
                .iter()
                .filter(|(_, idx)| !is_blank_cell(cell(*idx)))
                .map(|(label, idx)| format!("{label}: {}", cell(*idx)))
                .collect::<Vec<_>>()
                .join("\n"),
            OptionColumns::None => String::new(),
        }
    }
}

/// Label of a per-option header: `A`..`F` or `选项A`..`选项F`, any case.
fn option_label(header: &str) -> Option<char> {
    let trimmed = header.trim();
    let rest = trimmed.strip_prefix("选项").unwrap_or(trimmed);
    let mut chars = rest.chars();
    let letter = chars.next()?.to_ascii_uppercase();
    if chars.next().is_none() && ('A'..='F').contains(&letter) {
        Some(letter)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qbank_map::resolve_columns;

    fn labels(text: &str) -> String {
        extract_option_labels(text).into_iter().collect()
    }

    #[test]
    fn extracts_common_layouts() {
        assert_eq!(labels("A: x\nB: y"), "AB");
        assert_eq!(labels("A. 细胞核 B. 细胞质 C. 细胞膜"), "ABC");
        assert_eq!(labels("A、对\nB、错"), "AB");
        assert_eq!(labels("(A) one (B) two"), "AB");
        assert_eq!(labels("a) one b) two"), "AB");
        assert_eq!(labels("Ａ．全角"), "");
    }

    #[test]
    fn ignores_letters_inside_words_and_units() {
        assert_eq!(labels("P/E ratio"), "");
        assert_eq!(labels("R_f value"), "");
        assert_eq!(labels("Pre-E stage"), "");
        assert_eq!(labels("TextB: nothing"), "");
        assert_eq!(labels("a lower word"), "");
    }

    #[test]
    fn per_label_columns_are_sorted_and_joined() {
        let headers = ["题干", "选项C", "A", "b", "答案"];
        let mapping = resolve_columns(&headers);
        let columns = OptionColumns::scan(&headers, &mapping);
        assert_eq!(columns, OptionColumns::PerLabel(vec![('A', 2), ('B', 3), ('C', 1)]));

        let row: Vec<String> = ["q", "gamma", "alpha", "nan", "A"]
            .iter()
            .map(|s| (*s).to_string())
            .collect();
        assert_eq!(columns.reconstruct(&row), "A: alpha\nC: gamma");
    }

    #[test]
    fn combined_column_passes_through() {
        let headers = ["题干", "选项", "答案"];
        let mapping = resolve_columns(&headers);
        let columns = OptionColumns::scan(&headers, &mapping);
        assert_eq!(columns, OptionColumns::Combined(1));
        let row = vec!["q".to_string(), " A: x\nB: y ".to_string(), "A".to_string()];
        assert_eq!(columns.reconstruct(&row), "A: x\nB: y");
    }

    #[test]
    fn no_option_columns() {
        let headers = ["题干", "答案"];
        let mapping = resolve_columns(&headers);
        let columns = OptionColumns::scan(&headers, &mapping);
        assert!(columns.is_none());
        assert_eq!(columns.reconstruct(&["q".to_string(), "a".to_string()]), "");
    }
}
