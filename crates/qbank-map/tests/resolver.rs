use qbank_map::{ColumnMapping, resolve_columns, resolve_qa_columns};
use qbank_model::{CanonicalField, QaField};

fn render(mapping: &ColumnMapping<CanonicalField>) -> String {
    mapping
        .iter()
        .map(|(field, header)| format!("{field}={header}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[test]
fn maps_chinese_synonyms() {
    let mapping = resolve_columns(&["题目", "正确答案", "相关知识点", "答案解析", "题型"]);
    insta::assert_snapshot!(
        render(&mapping),
        @"stem=题目, answer=正确答案, analysis=答案解析, knowledge=相关知识点, type=题型"
    );
}

#[test]
fn maps_english_headers_case_insensitively() {
    let mapping = resolve_columns(&["Question", "Answer", "Explanation", "Level", "ID"]);
    insta::assert_snapshot!(
        render(&mapping),
        @"stem=Question, answer=Answer, analysis=Explanation, level=Level, serial_no=ID"
    );
}

#[test]
fn correct_answer_with_spacing() {
    let mapping = resolve_columns(&["Content", "Correct   Answer"]);
    assert_eq!(mapping.get(CanonicalField::Stem), Some("Content"));
    // Whitespace collapsing happens when the sheet is built, not here.
    assert_eq!(mapping.get(CanonicalField::Answer), None);

    let mapping = resolve_columns(&["Content", "Correct Answer"]);
    assert_eq!(mapping.get(CanonicalField::Answer), Some("Correct Answer"));
}

#[test]
fn unknown_headers_leave_fields_absent() {
    let mapping = resolve_columns(&["foo", "bar"]);
    assert!(mapping.is_empty());
}

#[test]
fn qa_table_does_not_know_exercise_headers() {
    let mapping = resolve_qa_columns(&["题干", "选项", "答案"]);
    assert_eq!(mapping.get(QaField::Question), None);
    assert_eq!(mapping.get(QaField::Answer), Some("答案"));

    let mapping = resolve_qa_columns(&["提问", "回答"]);
    assert_eq!(mapping.get(QaField::Question), Some("提问"));
    assert_eq!(mapping.get(QaField::Answer), Some("回答"));
}
