//! Property tests for option extraction and answer cleaning.

use proptest::prelude::*;
use qbank_model::ExerciseType;
use qbank_transform::{clean_answer, extract_option_labels};

fn option_lines() -> impl Strategy<Value = Vec<(char, String)>> {
    proptest::sample::subsequence(vec!['A', 'B', 'C', 'D', 'E', 'F'], 1..=6).prop_flat_map(
        |labels| {
            let n = labels.len();
            (Just(labels), proptest::collection::vec("[h-z]{1,8}", n))
                .prop_map(|(labels, texts)| labels.into_iter().zip(texts).collect())
        },
    )
}

fn render(lines: &[(char, String)]) -> String {
    lines
        .iter()
        .map(|(label, text)| format!("{label}: {text}"))
        .collect::<Vec<_>>()
        .join("\n")
}

proptest! {
    #[test]
    fn label_extraction_ignores_line_order(lines in option_lines()) {
        let forward = render(&lines);
        let mut reversed = lines.clone();
        reversed.reverse();
        let backward = render(&reversed);

        let expected: std::collections::BTreeSet<char> =
            lines.iter().map(|(label, _)| *label).collect();
        prop_assert_eq!(extract_option_labels(&forward), expected.clone());
        prop_assert_eq!(extract_option_labels(&backward), expected);
    }

    #[test]
    fn label_extraction_is_idempotent(lines in option_lines()) {
        let text = render(&lines);
        let first = extract_option_labels(&text);
        let relabelled: String = first
            .iter()
            .map(|label| format!("{label}: x"))
            .collect::<Vec<_>>()
            .join("\n");
        prop_assert_eq!(extract_option_labels(&relabelled), first);
    }

    #[test]
    fn verbose_choice_answer_reduces_to_letter(
        letter in proptest::sample::select(vec!['A', 'B', 'C', 'D', 'E', 'F']),
        sep in proptest::sample::select(vec![": ", ". ", "、", " ", ")"]),
        text in "[h-z ]{0,12}",
    ) {
        let raw = format!("{letter}{sep}{text}");
        prop_assert_eq!(
            clean_answer(&raw, Some(ExerciseType::Choice)),
            clean_answer(&letter.to_string(), Some(ExerciseType::Choice))
        );
        prop_assert_eq!(clean_answer(&raw, Some(ExerciseType::Choice)), letter.to_string());
    }
}
