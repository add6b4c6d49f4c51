//! Header → field resolution.

use std::collections::BTreeMap;

use qbank_model::{CanonicalField, QaField};

use crate::aliases::{AliasRule, EXERCISE_ALIASES, QA_ALIASES, STEM_HINT_EXCLUSIONS, STEM_HINTS};
use crate::lookup::HeaderLookup;

/// Field → header assignment for one sheet. Each header supplies at most one
/// field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping<F> {
    entries: BTreeMap<F, String>,
}

impl<F> Default for ColumnMapping<F> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<F: Ord + Copy> ColumnMapping<F> {
    /// Header supplying `field`, if any.
    pub fn get(&self, field: F) -> Option<&str> {
        self.entries.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: F) -> bool {
        self.entries.contains_key(&field)
    }

    pub fn is_claimed(&self, header: &str) -> bool {
        self.entries.values().any(|claimed| claimed == header)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (F, &str)> {
        self.entries
            .iter()
            .map(|(field, header)| (*field, header.as_str()))
    }

    fn insert(&mut self, field: F, header: &str) {
        self.entries.insert(field, header.to_string());
    }
}

/// Resolves headers against an alias table.
///
/// Fields are visited in table order and aliases in priority order; the first
/// alias that hits an unclaimed header wins. Single-letter aliases are skipped
/// when the sheet also has bare option-letter columns, so an option column `A`
/// is never read as the answer.
pub fn resolve_with<F, S>(headers: &[S], rules: &[AliasRule<F>]) -> ColumnMapping<F>
where
    F: Ord + Copy,
    S: AsRef<str>,
{
    let lookup = HeaderLookup::new(headers);
    let letters_are_options = lookup.has_bare_option_letters();
    let mut mapping = ColumnMapping::default();
    for rule in rules {
        for alias in rule.aliases {
            if letters_are_options && alias.chars().count() == 1 {
                continue;
            }
            if let Some(header) = lookup.get(alias)
                && !mapping.is_claimed(header)
            {
                mapping.insert(rule.field, header);
                break;
            }
        }
    }
    mapping
}

/// Resolves exercise headers, including the stem fallback heuristic.
pub fn resolve_columns<S: AsRef<str>>(headers: &[S]) -> ColumnMapping<CanonicalField> {
    let mut mapping = resolve_with(headers, EXERCISE_ALIASES);
    if !mapping.contains(CanonicalField::Stem)
        && let Some(header) = stem_by_hint(headers, &mapping)
    {
        tracing::debug!(header, "stem resolved by keyword hint");
        mapping.insert(CanonicalField::Stem, header);
    }
    mapping
}

/// Resolves QA headers against the QA alias table.
pub fn resolve_qa_columns<S: AsRef<str>>(headers: &[S]) -> ColumnMapping<QaField> {
    resolve_with(headers, QA_ALIASES)
}

fn stem_by_hint<'a, S: AsRef<str>>(
    headers: &'a [S],
    mapping: &ColumnMapping<CanonicalField>,
) -> Option<&'a str> {
    headers.iter().map(AsRef::as_ref).find(|header| {
        !mapping.is_claimed(header)
            && STEM_HINTS.iter().any(|hint| header.contains(hint))
            && !STEM_HINT_EXCLUSIONS
                .iter()
                .any(|excluded| header.contains(excluded))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_alias_wins() {
        let mapping = resolve_columns(&["答案", "Answer", "题干"]);
        assert_eq!(mapping.get(CanonicalField::Answer), Some("Answer"));
        assert_eq!(mapping.get(CanonicalField::Stem), Some("题干"));
    }

    #[test]
    fn header_is_claimed_once() {
        // `question` is a stem alias; it must not also feed another field.
        let mapping = resolve_columns(&["question"]);
        assert_eq!(mapping.get(CanonicalField::Stem), Some("question"));
        assert_eq!(mapping.len(), 1);
    }

    #[test]
    fn option_letter_a_is_not_the_answer() {
        let mapping = resolve_columns(&["题干", "A", "B", "C", "答案"]);
        assert_eq!(mapping.get(CanonicalField::Answer), Some("答案"));

        let mapping = resolve_columns(&["题干", "A", "B"]);
        assert_eq!(mapping.get(CanonicalField::Answer), None);
    }

    #[test]
    fn single_letters_map_without_option_columns() {
        let mapping = resolve_qa_columns(&["Q", "A"]);
        assert_eq!(mapping.get(QaField::Question), Some("Q"));
        assert_eq!(mapping.get(QaField::Answer), Some("A"));
    }

    #[test]
    fn stem_hint_skips_type_and_analysis_headers() {
        let mapping = resolve_columns(&["题目类型", "题目解析", "本题题目", "答案"]);
        assert_eq!(mapping.get(CanonicalField::Stem), Some("本题题目"));
        assert_eq!(mapping.get(CanonicalField::Type), Some("题目类型"));
    }
}
