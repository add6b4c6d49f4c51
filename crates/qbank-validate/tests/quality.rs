//! Integration tests for assessment, summaries, gating and suggestions.

use std::collections::BTreeMap;

use insta::assert_snapshot;
use proptest::prelude::*;
use qbank_model::{
    CanonicalFrame, ContentKind, ExerciseRecord, ExerciseTypeValue, Level, QaRecord,
    QualitySummary, SubmissionMetadata,
};
use qbank_validate::{
    FALLBACK_SUGGESTION, GatePolicy, GateReason, QualityOptions, assess, evaluate_gate,
    suggestions_for, summarize,
};

fn exercise(exercise_type: &str, options: &str, answer: &str) -> ExerciseRecord {
    ExerciseRecord {
        exercise_type: ExerciseTypeValue::from(exercise_type.to_string()),
        stem: "下列哪项属于固定成本？".to_string(),
        options: options.to_string(),
        answer: answer.to_string(),
        knowledge: "成本理论".to_string(),
        analysis: String::new(),
        level: Level::Undergraduate,
    }
}

fn metadata(declared: Option<ContentKind>, detected: ContentKind, ratio: f64) -> SubmissionMetadata {
    SubmissionMetadata {
        filename: "bank.xlsx".to_string(),
        sheets: vec!["Sheet1".to_string()],
        columns: Vec::new(),
        total: 20,
        declared_kind: declared,
        detected_kind: detected,
        kind: declared.unwrap_or(detected),
        exercise_type: None,
        level: None,
        detected_level: None,
        quality_summary: Some(QualitySummary {
            error_row_ratio: ratio,
            ..QualitySummary::default()
        }),
        mixed_types: None,
        digest: None,
    }
}

#[test]
fn answer_outside_options_is_flagged() {
    let frame = CanonicalFrame::Exercise(vec![exercise("选择题", "A: 厂房租金\nB: 原材料", "C")]);
    let report = assess(&frame, &QualityOptions::default());
    assert!(report.scores()[0] <= 70);
    assert_snapshot!(report.flags_column().join("\n"), @"Error:ANS_NOT_IN_OPTS:答案不在选项中");
}

#[test]
fn judgement_true_is_valid() {
    let frame = CanonicalFrame::Exercise(vec![exercise("判断题", "", "True")]);
    let report = assess(&frame, &QualityOptions::default());
    assert_eq!(report.scores(), vec![100]);
    assert_snapshot!(report.flags_column().join("\n"), @"");
}

#[test]
fn empty_qa_row_renders_all_flags() {
    let frame = CanonicalFrame::Qa(vec![QaRecord {
        question: String::new(),
        answer: "是".to_string(),
    }]);
    let report = assess(&frame, &QualityOptions::default());
    assert_snapshot!(
        report.flags_column().join("\n"),
        @"Error:Q_EMPTY:问题为空|Warn:Q_SHORT:问题过短"
    );
}

#[test]
fn summary_feeds_suggestions() {
    let frame = CanonicalFrame::Exercise(vec![
        exercise("选择题", "", "A"),
        exercise("选择题", "", "B"),
        {
            let mut record = exercise("简答题", "", "");
            record.knowledge = String::new();
            record
        },
    ]);
    let summary = summarize(&assess(&frame, &QualityOptions::default()));
    assert_eq!(summary.error_count, 3);
    assert_eq!(summary.error_row_ratio, 1.0);
    assert_snapshot!(
        suggestions_for(&summary.errors, ContentKind::Exercise).join("\n"),
        @r"
    答案需为选项字母（如 A/B/C/D），与选项一致（问题数：2）
    补充选项（options），使用格式：A: xxx\nB: xxx（问题数：2）
    补充答案（answer）（问题数：1）
    补充知识点（knowledge），关联课程章节或概念（问题数：1）
    "
    );
}

#[test]
fn suggestions_fall_back_when_no_tip_matches() {
    let mut errors = BTreeMap::new();
    errors.insert("ANS_SHORT".to_string(), 4);
    assert_eq!(
        suggestions_for(&errors, ContentKind::Exercise),
        vec![FALLBACK_SUGGESTION.to_string()]
    );
    assert_eq!(
        suggestions_for(&BTreeMap::new(), ContentKind::Qa),
        vec![FALLBACK_SUGGESTION.to_string()]
    );
}

#[test]
fn gate_rejects_high_error_ratio_unless_forced() {
    let policy = GatePolicy::default();
    let meta = metadata(None, ContentKind::Qa, 0.1);

    let decision = evaluate_gate(&meta, &policy, false);
    assert!(!decision.accepted);
    assert_eq!(
        decision.reasons[0].to_string(),
        "质量错误占比 10.00% 超过阈值，建议修复后再入库"
    );

    assert!(evaluate_gate(&meta, &policy, true).accepted);
    assert!(evaluate_gate(&metadata(None, ContentKind::Qa, 0.05), &policy, false).accepted);
}

#[test]
fn gate_always_rejects_kind_mismatch() {
    let policy = GatePolicy::default();
    let meta = metadata(Some(ContentKind::Exercise), ContentKind::Qa, 0.0);
    for force in [false, true] {
        let decision = evaluate_gate(&meta, &policy, force);
        assert!(!decision.accepted);
        assert_eq!(decision.reasons, vec![GateReason::KindMismatch]);
        assert!(decision.is_blocked_by_mismatch());
    }

    let lenient = GatePolicy {
        block_on_kind_mismatch: false,
        ..GatePolicy::default()
    };
    assert!(evaluate_gate(&meta, &lenient, false).accepted);
}

#[test]
fn gate_accepts_submission_without_summary() {
    let mut meta = metadata(None, ContentKind::Exercise, 0.0);
    meta.quality_summary = None;
    assert!(evaluate_gate(&meta, &GatePolicy::default(), false).accepted);
}

#[test]
fn gate_policy_and_decision_serialize() {
    let policy: GatePolicy =
        serde_json::from_str(r#"{"error_ratio_threshold": 0.1}"#).unwrap();
    assert_eq!(policy.error_ratio_threshold, 0.1);
    assert!(policy.block_on_kind_mismatch);

    let meta = metadata(Some(ContentKind::Exercise), ContentKind::Qa, 0.2);
    let decision = evaluate_gate(&meta, &policy, false);
    assert_eq!(
        serde_json::to_value(&decision).unwrap(),
        serde_json::json!({
            "accepted": false,
            "reasons": [
                "KindMismatch",
                { "ErrorRatio": { "ratio": 0.2, "threshold": 0.1 } }
            ]
        })
    );
}

fn arb_exercise() -> impl Strategy<Value = ExerciseRecord> {
    (
        proptest::sample::select(vec!["选择题", "判断题", "填空题", "简答题", "", "连线题"]),
        "[A-D: a-z\n]{0,20}",
        "[A-Za-z对错 ]{0,6}",
        "[a-z]{0,4}",
        "[a-z]{0,4}",
        "[a-z]{0,4}",
    )
        .prop_map(|(exercise_type, options, answer, stem, knowledge, analysis)| ExerciseRecord {
            exercise_type: ExerciseTypeValue::from(exercise_type.to_string()),
            stem,
            options,
            answer,
            knowledge,
            analysis,
            level: Level::Graduate,
        })
}

proptest! {
    #[test]
    fn scores_stay_in_bounds_and_assessment_is_repeatable(
        records in proptest::collection::vec(arb_exercise(), 0..12),
        garbled_check in any::<bool>(),
    ) {
        let frame = CanonicalFrame::Exercise(records);
        let options = QualityOptions { garbled_check };
        let first = assess(&frame, &options);
        let second = assess(&frame, &options);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.len(), frame.len());
        prop_assert!(first.scores().iter().all(|score| *score <= 100));

        let summary = summarize(&first);
        prop_assert!((0.0..=1.0).contains(&summary.error_row_ratio));
        prop_assert!(summary.error_count <= frame.len());
    }
}
