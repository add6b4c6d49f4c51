//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use qbank_model::{ContentKind, ExerciseType, Level};

#[derive(Parser)]
#[command(
    name = "qbank",
    version,
    about = "Normalize and quality-check question-bank spreadsheets",
    long_about = "Normalize question-bank spreadsheets (CSV, XLSX, XLS, ODS) into the \
                  canonical QA or exercise schema.\n\n\
                  Column headers are matched by synonym, scattered option columns are \
                  merged, and every row is scored against the quality rules."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (default: pretty, or the config file's choice).
    #[arg(long = "log-format", value_enum, global = true)]
    pub log_format: Option<LogFormatArg>,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// TOML configuration file with [quality] and [logging] tables.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse a submission and report structure, warnings and quality.
    Inspect(InspectArgs),

    /// Parse a submission, apply the acceptance gate and export canonical CSV.
    Ingest(IngestArgs),

    /// List the quality rules.
    Rules(RulesArgs),
}

/// Options shared by every command that processes a file.
#[derive(Args)]
pub struct SubmissionArgs {
    /// Submission file (.csv, .xlsx, .xlsm, .xlsb, .xls, .ods).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Declared content kind (default: detect).
    #[arg(long = "kind", value_enum)]
    pub kind: Option<KindArg>,

    /// Exercise subtype applied to every row, e.g. 选择题 or choice.
    #[arg(long = "exercise-type", value_name = "TYPE", value_parser = parse_exercise_type)]
    pub exercise_type: Option<ExerciseType>,

    /// Academic level applied to every row (本科/ug or 研究生/grad).
    #[arg(long = "level", value_name = "LEVEL", value_parser = parse_level)]
    pub level: Option<Level>,

    /// Enable the garbled-text quality rules.
    #[arg(long = "garbled-check")]
    pub garbled_check: bool,
}

#[derive(Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub submission: SubmissionArgs,

    /// Print metadata and warnings as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct IngestArgs {
    #[command(flatten)]
    pub submission: SubmissionArgs,

    /// Output CSV file or directory (default: <stem>_parsed_<kind>.csv).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Store despite too many error rows. Does not override a kind mismatch.
    #[arg(long = "force")]
    pub force: bool,

    /// Maximum share of rows with Error flags (default 0.05).
    #[arg(long = "threshold", value_name = "RATIO")]
    pub threshold: Option<f64>,
}

#[derive(Args)]
pub struct RulesArgs {
    /// Only list rules for one content kind.
    #[arg(long = "kind", value_enum)]
    pub kind: Option<KindArg>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    Qa,
    Exercise,
}

impl From<KindArg> for ContentKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Qa => ContentKind::Qa,
            KindArg::Exercise => ContentKind::Exercise,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_exercise_type(value: &str) -> Result<ExerciseType, String> {
    value.parse().map_err(|err: qbank_model::ModelError| err.to_string())
}

fn parse_level(value: &str) -> Result<Level, String> {
    value.parse().map_err(|err: qbank_model::ModelError| err.to_string())
}
