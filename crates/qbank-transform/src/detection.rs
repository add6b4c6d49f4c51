//! Content kind, subtype and level detection.
//!
//! Sheet names are the strongest signal: uploaders usually name sheets after
//! the question type ("单选题", "问答"). Headers and row content are only
//! consulted when no sheet name carries a keyword.

use qbank_model::{ContentKind, ExerciseType, Level, RawSheet};

use crate::inference::is_judgement_answer;

/// What a sheet name says about its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetSignal {
    Qa,
    Exercise(ExerciseType),
}

impl SheetSignal {
    pub fn kind(&self) -> ContentKind {
        match self {
            SheetSignal::Qa => ContentKind::Qa,
            SheetSignal::Exercise(_) => ContentKind::Exercise,
        }
    }

    pub fn exercise_type(&self) -> Option<ExerciseType> {
        match self {
            SheetSignal::Qa => None,
            SheetSignal::Exercise(t) => Some(*t),
        }
    }
}

/// Keyword table, scanned in order. `问答` comes first so "问答题" reads as QA.
const SHEET_KEYWORDS: &[(&[&str], SheetSignal)] = &[
    (&["问答"], SheetSignal::Qa),
    (
        &["选择", "单选", "多选"],
        SheetSignal::Exercise(ExerciseType::Choice),
    ),
    (&["填空"], SheetSignal::Exercise(ExerciseType::FillBlank)),
    (&["判断"], SheetSignal::Exercise(ExerciseType::Judgement)),
    (
        &["简答", "计算", "名词"],
        SheetSignal::Exercise(ExerciseType::ShortAnswer),
    ),
    (&["论述"], SheetSignal::Exercise(ExerciseType::Essay)),
    (&["案例"], SheetSignal::Exercise(ExerciseType::Case)),
];

/// Headers that indicate option columns, compared lower-cased.
const OPTION_HEADERS: &[&str] = &[
    "options", "选项", "a", "b", "c", "d", "e", "选项a", "选项b", "选项c", "选项d",
];

const GRADUATE_MARKERS: &[&str] = &["研究生", "硕士", "硕博", "graduate", "postgraduate"];
const UNDERGRADUATE_MARKERS: &[&str] = &["本科", "undergraduate", "大专"];

/// Maximum answer length (in characters) still read as a fill-in-the-blank.
pub const FILL_BLANK_MAX_CHARS: usize = 12;

/// Classifies a sheet name by keyword. First matching keyword wins.
pub fn detect_type_from_sheet_name(name: &str) -> Option<SheetSignal> {
    SHEET_KEYWORDS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|kw| name.contains(kw)))
        .map(|(_, signal)| *signal)
}

/// Decides whether a submission holds QA pairs or exercises.
///
/// The first sheet name with a keyword decides. Otherwise each sheet's
/// headers are checked in order: option-like or type headers mean exercises,
/// a `question` + `answer` pair means QA. Defaults to exercises.
pub fn detect_content_kind(sheets: &[RawSheet]) -> ContentKind {
    if let Some(signal) = sheets
        .iter()
        .find_map(|sheet| detect_type_from_sheet_name(&sheet.name))
    {
        return signal.kind();
    }
    for sheet in sheets {
        let lower: Vec<String> = sheet
            .headers
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();
        let has = |name: &str| lower.iter().any(|h| h == name);
        if OPTION_HEADERS.iter().any(|name| has(name)) {
            return ContentKind::Exercise;
        }
        if has("type") || has("题型") {
            return ContentKind::Exercise;
        }
        if has("question") && has("answer") {
            return ContentKind::Qa;
        }
    }
    ContentKind::Exercise
}

/// Picks the submission-wide exercise subtype.
///
/// Sheet names are consulted first; failing that, the normalized
/// `(options, answer)` pairs decide. An empty row set yields 选择题.
pub fn detect_exercise_subtype<'a, S, I>(sheet_names: &[S], rows: I) -> ExerciseType
where
    S: AsRef<str>,
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    if let Some(subtype) = sheet_names
        .iter()
        .filter_map(|name| detect_type_from_sheet_name(name.as_ref()))
        .find_map(|signal| signal.exercise_type())
    {
        return subtype;
    }

    let rows: Vec<(&str, &str)> = rows.into_iter().collect();
    if rows.is_empty() {
        return ExerciseType::Choice;
    }
    if rows
        .iter()
        .any(|(options, _)| !options.trim().is_empty())
    {
        return ExerciseType::Choice;
    }
    let answers: Vec<&str> = rows
        .iter()
        .map(|(_, answer)| answer.trim())
        .filter(|answer| !answer.is_empty())
        .collect();
    if !answers.is_empty() && answers.iter().all(|answer| is_judgement_answer(answer)) {
        return ExerciseType::Judgement;
    }
    if answers
        .iter()
        .all(|answer| answer.chars().count() <= FILL_BLANK_MAX_CHARS)
    {
        return ExerciseType::FillBlank;
    }
    ExerciseType::ShortAnswer
}

/// Detects the academic level from sheet names. Graduate markers win over
/// undergraduate ones; no marker means 本科.
pub fn detect_level<S: AsRef<str>>(sheet_names: &[S]) -> Level {
    let joined = sheet_names
        .iter()
        .map(|name| name.as_ref().to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");
    // "undergraduate" contains "graduate"; remove it before the graduate scan.
    let without_ug = joined.replace("undergraduate", " ");
    if GRADUATE_MARKERS.iter().any(|m| without_ug.contains(m)) {
        return Level::Graduate;
    }
    if UNDERGRADUATE_MARKERS.iter().any(|m| joined.contains(m)) {
        return Level::Undergraduate;
    }
    Level::Undergraduate
}

/// Advisory text shown when the declared kind disagrees with detection.
pub fn kind_mismatch_warning(declared: ContentKind, detected: ContentKind) -> Option<String> {
    (declared != detected).then(|| {
        format!("类型选择与系统识别不一致：你选择了{declared}，系统识别为{detected}")
    })
}
