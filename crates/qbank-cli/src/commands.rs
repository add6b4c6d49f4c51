use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, info_span, warn};

use qbank_core::{IngestOptions, IngestOutcome, process_submission};
use qbank_ingest::read_submission;
use qbank_model::{ContentKind, SubmissionMetadata};
use qbank_validate::{GateDecision, QualityOptions, evaluate_gate};

use qbank_cli::config::QbankConfig;
use qbank_cli::export::{output_path, write_canonical_csv};

use crate::cli::{IngestArgs, InspectArgs, SubmissionArgs};
use crate::summary::{print_gate, print_overview, print_rules};

/// Result of `qbank ingest`.
pub struct IngestResult {
    pub outcome: IngestOutcome,
    pub decision: GateDecision,
    pub threshold: f64,
    /// Export destination; `None` when rejected or when no rows survived.
    pub written: Option<PathBuf>,
}

#[derive(Serialize)]
struct InspectJson<'a> {
    metadata: &'a SubmissionMetadata,
    warnings: &'a [String],
}

pub fn run_inspect(args: &InspectArgs, config: &QbankConfig) -> Result<()> {
    let outcome = load_and_process(&args.submission, config)?;
    if args.json {
        let json = serde_json::to_string_pretty(&InspectJson {
            metadata: &outcome.metadata,
            warnings: &outcome.warnings,
        })
        .context("serialize metadata")?;
        println!("{json}");
    } else {
        print_overview(&outcome.metadata, &outcome.warnings);
    }
    Ok(())
}

pub fn run_ingest(args: &IngestArgs, config: &QbankConfig) -> Result<IngestResult> {
    let outcome = load_and_process(&args.submission, config)?;
    let policy = config.gate_policy(args.threshold);
    let decision = evaluate_gate(&outcome.metadata, &policy, args.force);
    let mut written = None;
    if !decision.accepted {
        warn!(
            filename = %outcome.metadata.filename,
            reasons = decision.reasons.len(),
            "submission rejected"
        );
    } else if outcome.frame.is_empty() {
        warn!(filename = %outcome.metadata.filename, "no rows to export");
    } else {
        let path = output_path(args.output.as_deref(), &outcome.metadata);
        write_canonical_csv(&outcome.frame, &path)?;
        info!(path = %path.display(), rows = outcome.frame.len(), "export written");
        written = Some(path);
    }
    Ok(IngestResult {
        outcome,
        decision,
        threshold: policy.error_ratio_threshold,
        written,
    })
}

pub fn print_ingest(result: &IngestResult) {
    print_overview(&result.outcome.metadata, &result.outcome.warnings);
    println!();
    print_gate(&result.decision, &result.outcome.metadata, result.threshold);
    if let Some(path) = &result.written {
        println!("Saved: {}", path.display());
    }
}

pub fn run_rules(kind: Option<ContentKind>) -> Result<()> {
    print_rules(kind);
    Ok(())
}

fn load_and_process(args: &SubmissionArgs, config: &QbankConfig) -> Result<IngestOutcome> {
    let span = info_span!("ingest", file = %args.file.display());
    let _guard = span.enter();
    let start = Instant::now();

    let sheet_set = read_submission(&args.file)
        .with_context(|| format!("read {}", args.file.display()))?;
    let options = ingest_options(args, config);
    let outcome = process_submission(&sheet_set, &options)
        .with_context(|| format!("process {}", sheet_set.filename))?;

    info!(
        rows = outcome.metadata.total,
        warnings = outcome.warnings.len(),
        duration_ms = start.elapsed().as_millis(),
        "submission processed"
    );
    Ok(outcome)
}

fn ingest_options(args: &SubmissionArgs, config: &QbankConfig) -> IngestOptions {
    IngestOptions {
        declared_kind: args.kind.map(ContentKind::from),
        exercise_type: args.exercise_type,
        level: args.level,
        quality: QualityOptions {
            garbled_check: args.garbled_check || config.quality.garbled_check,
        },
    }
}
