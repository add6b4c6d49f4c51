//! End-to-end pipeline tests over in-memory sheet sets.

use insta::assert_snapshot;
use proptest::prelude::*;
use qbank_core::{IngestOptions, process_submission, to_dataframe};
use qbank_model::{CanonicalFrame, ContentKind, ExerciseType, Level, RawSheet, SheetSet};
use qbank_validate::{QualityOptions, assess};

fn qa_options() -> IngestOptions {
    IngestOptions {
        declared_kind: Some(ContentKind::Qa),
        ..IngestOptions::default()
    }
}

#[test]
fn single_qa_row_is_kept_without_warnings() {
    let set = SheetSet::new(
        "qa.csv",
        vec![RawSheet::from_rows("CSV", &["question", "answer"], &[&["q1", "a1"]])],
    );
    let outcome = process_submission(&set, &qa_options()).unwrap();
    assert_eq!(outcome.metadata.total, 1);
    assert!(outcome.warnings.is_empty());
    // "q1" is shorter than three characters.
    let summary = outcome.metadata.quality_summary.unwrap();
    assert_eq!(summary.score_avg, 85.0);
    assert_eq!(summary.error_count, 0);

    let set = SheetSet::new(
        "qa.csv",
        vec![RawSheet::from_rows(
            "CSV",
            &["question", "answer"],
            &[&["什么是通货膨胀？", "物价总水平持续上涨"]],
        )],
    );
    let outcome = process_submission(&set, &qa_options()).unwrap();
    assert_eq!(outcome.metadata.quality_summary.unwrap().score_avg, 100.0);
}

#[test]
fn blank_qa_row_is_dropped() {
    let sheet = RawSheet {
        name: "CSV".to_string(),
        headers: vec!["question".to_string(), "answer".to_string()],
        rows: vec![vec![String::new(), String::new()]],
    };
    let outcome = process_submission(&SheetSet::new("qa.csv", vec![sheet]), &qa_options()).unwrap();
    assert_eq!(outcome.frame, CanonicalFrame::Qa(Vec::new()));
    assert!(outcome.metadata.columns.is_empty());
    assert_eq!(outcome.metadata.quality_summary, None);
    assert!(outcome.quality.is_empty());
}

#[test]
fn choice_answer_outside_options_is_flagged() {
    let sheet = RawSheet::from_rows(
        "Sheet1",
        &["type", "stem", "options", "answer", "knowledge"],
        &[&["选择题", "s", "A: x\nB: y", "C", "k"]],
    );
    let outcome = process_submission(
        &SheetSet::new("ex.xlsx", vec![sheet]),
        &IngestOptions::default(),
    )
    .unwrap();
    let row = &outcome.quality.rows()[0];
    assert!(row.has_code("ANS_NOT_IN_OPTS"));
    assert!(row.score <= 70);
    assert_snapshot!(row.render_flags(), @"Error:ANS_NOT_IN_OPTS:答案不在选项中");
}

#[test]
fn judgement_true_passes() {
    let sheet = RawSheet::from_rows(
        "Sheet1",
        &["type", "stem", "answer", "knowledge"],
        &[&["判断题", "需求曲线向右下方倾斜", "True", "需求"]],
    );
    let outcome = process_submission(
        &SheetSet::new("ex.xlsx", vec![sheet]),
        &IngestOptions::default(),
    )
    .unwrap();
    assert!(!outcome.quality.rows()[0].has_code("ANS_INVALID"));
}

#[test]
fn sheet_name_subtype_types_every_row() {
    let sheet = RawSheet::from_rows(
        "计算题",
        &["题目", "答案", "知识点"],
        &[
            &["计算弹性", "1.5", "弹性"],
            &["计算利润", "利润等于总收益减去总成本，本题为200元", "利润"],
        ],
    );
    let outcome = process_submission(
        &SheetSet::new("calc.xlsx", vec![sheet]),
        &IngestOptions::default(),
    )
    .unwrap();
    assert_eq!(outcome.metadata.kind, ContentKind::Exercise);
    assert_eq!(outcome.metadata.exercise_type, Some(ExerciseType::ShortAnswer));
    let CanonicalFrame::Exercise(rows) = &outcome.frame else {
        panic!("expected exercises");
    };
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row.exercise_type.as_str() == "简答题"));
    assert_eq!(outcome.metadata.mixed_types, None);
}

#[test]
fn mixed_workbook_follows_first_sheet_signal() {
    let qa = RawSheet::from_rows("问答", &["question", "answer"], &[&["什么是GDP？", "国内生产总值"]]);
    let choice = RawSheet::from_rows(
        "选择题",
        &["题干", "选项", "答案"],
        &[&["下列属于固定成本的是", "A: 租金\nB: 原材料", "A"]],
    );
    let outcome = process_submission(
        &SheetSet::new("mixed.xlsx", vec![qa, choice]),
        &IngestOptions::default(),
    )
    .unwrap();
    assert_eq!(outcome.metadata.detected_kind, ContentKind::Qa);
    assert_eq!(outcome.metadata.total, 1);
    assert_snapshot!(outcome.warnings.join("\n"), @"[选择题] 缺少必填列：question/answer");
}

#[test]
fn declared_kind_mismatch_warns_per_sheet() {
    let qa = RawSheet::from_rows("问答", &["question", "answer"], &[&["什么是GDP？", "国内生产总值"]]);
    let extra = RawSheet::from_rows("补充", &["question", "answer"], &[&["什么是CPI？", "消费者物价指数"]]);
    let options = IngestOptions {
        declared_kind: Some(ContentKind::Exercise),
        ..IngestOptions::default()
    };
    let outcome = process_submission(&SheetSet::new("qa.xlsx", vec![qa, extra]), &options).unwrap();
    assert!(outcome.metadata.kind_mismatch());
    let mismatch: Vec<&String> = outcome
        .warnings
        .iter()
        .filter(|w| w.contains("类型选择与系统识别不一致"))
        .collect();
    assert_snapshot!(
        mismatch.iter().map(|w| w.as_str()).collect::<Vec<_>>().join("\n"),
        @r"
    [问答] 类型选择与系统识别不一致：你选择了习题库，系统识别为问答对
    [补充] 类型选择与系统识别不一致：你选择了习题库，系统识别为问答对
    "
    );
}

#[test]
fn level_detection_and_override() {
    let sheet = || {
        RawSheet::from_rows(
            "研究生-单选",
            &["题干", "选项", "答案", "知识点"],
            &[&["s", "A: x\nB: y", "A", "k"]],
        )
    };
    let outcome = process_submission(
        &SheetSet::new("grad.xlsx", vec![sheet()]),
        &IngestOptions::default(),
    )
    .unwrap();
    assert_eq!(outcome.metadata.level, Some(Level::Graduate));
    assert_eq!(outcome.metadata.detected_level, Some(Level::Graduate));

    let options = IngestOptions {
        level: Some(Level::Undergraduate),
        ..IngestOptions::default()
    };
    let outcome = process_submission(&SheetSet::new("grad.xlsx", vec![sheet()]), &options).unwrap();
    assert_eq!(outcome.metadata.level, Some(Level::Undergraduate));
    assert_eq!(outcome.metadata.detected_level, None);
    let CanonicalFrame::Exercise(rows) = &outcome.frame else {
        panic!("expected exercises");
    };
    assert_eq!(rows[0].level, Level::Undergraduate);
}

#[test]
fn declared_subtype_still_reports_mixed_rows() {
    let sheet = RawSheet::from_rows(
        "Sheet1",
        &["题干", "选项", "答案", "知识点"],
        &[
            &["光合作用发生在哪里？", "A: 叶绿体\nB: 线粒体", "A", "光合作用"],
            &["细胞是生命活动的基本单位", "", "对", "细胞"],
            &["绿色植物把光能转化为化学能的过程叫", "", "光合作用", "光合作用"],
        ],
    );
    let options = IngestOptions {
        exercise_type: Some(ExerciseType::Choice),
        ..IngestOptions::default()
    };
    let outcome =
        process_submission(&SheetSet::new("bio.xlsx", vec![sheet]), &options).unwrap();

    let CanonicalFrame::Exercise(rows) = &outcome.frame else {
        panic!("expected exercises");
    };
    assert!(rows.iter().all(|row| row.exercise_type.known() == Some(ExerciseType::Choice)));
    assert_eq!(outcome.metadata.exercise_type, Some(ExerciseType::Choice));
    assert_eq!(outcome.metadata.mixed_types.map(|counts| counts.len()), Some(3));
    assert_snapshot!(outcome.warnings.join("\n"), @"检测到混合题型：选择题1条, 填空题1条, 判断题1条");
}

#[test]
fn missing_type_column_is_not_a_warning() {
    let sheet = RawSheet::from_rows(
        "Sheet1",
        &["题干", "选项", "答案", "知识点"],
        &[&["需求曲线向下倾斜的原因是？", "A: 替代效应\nB: 规模效应", "A", "需求"]],
    );
    let outcome = process_submission(
        &SheetSet::new("demand.xlsx", vec![sheet]),
        &IngestOptions::default(),
    )
    .unwrap();
    assert!(outcome.warnings.is_empty(), "{:?}", outcome.warnings);
}

#[test]
fn export_includes_quality_overlay() {
    let sheet = RawSheet::from_rows(
        "单选",
        &["题干", "A", "B", "答案", "知识点"],
        &[&["s", "x", "y", "B", "k"]],
    );
    let outcome = process_submission(
        &SheetSet::new("ex.xlsx", vec![sheet]),
        &IngestOptions::default(),
    )
    .unwrap();
    let df = to_dataframe(&outcome.frame, Some(&outcome.quality)).unwrap();
    assert_eq!(df.height(), 1);
    assert_eq!(df.width(), 9);
}

fn arb_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("nan".to_string()),
        "[a-z对错A-D:. ]{1,10}",
    ]
}

proptest! {
    #[test]
    fn qa_rows_are_never_blank(rows in proptest::collection::vec((arb_cell(), arb_cell()), 0..10)) {
        let sheet = RawSheet::new(
            "CSV",
            ["question", "answer"],
            rows.into_iter().map(|(q, a)| vec![q, a]),
        );
        let outcome = process_submission(&SheetSet::new("qa.csv", vec![sheet]), &qa_options()).unwrap();
        let CanonicalFrame::Qa(records) = &outcome.frame else {
            panic!("expected QA frame");
        };
        for record in records {
            prop_assert!(!record.question.trim().is_empty());
            prop_assert!(!record.answer.trim().is_empty());
        }
        prop_assert_eq!(outcome.quality.len(), records.len());
    }

    #[test]
    fn exercise_assessment_is_repeatable(
        rows in proptest::collection::vec((arb_cell(), arb_cell(), arb_cell()), 0..10),
    ) {
        let sheet = RawSheet::new(
            "Sheet1",
            ["stem", "options", "answer"],
            rows.into_iter().map(|(s, o, a)| vec![s, o, a]),
        );
        let outcome = process_submission(&SheetSet::new("ex.csv", vec![sheet]), &IngestOptions::default()).unwrap();
        let CanonicalFrame::Exercise(records) = &outcome.frame else {
            panic!("expected exercise frame");
        };
        prop_assert!(records.iter().all(|record| !record.stem.is_empty()));
        let again = assess(&outcome.frame, &QualityOptions::default());
        prop_assert_eq!(&again, &outcome.quality);
    }
}
