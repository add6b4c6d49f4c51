//! Question-bank ingestion CLI.

use clap::{ColorChoice, Parser};
use qbank_cli::config::{QbankConfig, load_config};
use qbank_cli::logging::{LogConfig, LogFormat, init_logging};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{print_ingest, run_ingest, run_inspect, run_rules};

/// Exit code for a submission rejected by the acceptance gate.
const EXIT_REJECTED: i32 = 2;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let config = match &cli.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(error) => {
                eprintln!("error: {error:#}");
                std::process::exit(1);
            }
        },
        None => QbankConfig::default(),
    };
    let log_config = log_config_from_cli(&cli, &config);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match &cli.command {
        Command::Inspect(args) => match run_inspect(args, &config) {
            Ok(()) => 0,
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Ingest(args) => match run_ingest(args, &config) {
            Ok(result) => {
                print_ingest(&result);
                if result.decision.accepted { 0 } else { EXIT_REJECTED }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Rules(args) => match run_rules(args.kind.map(Into::into)) {
            Ok(()) => 0,
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags, falling back to the config
/// file for format and destination.
fn log_config_from_cli(cli: &Cli, config: &QbankConfig) -> LogConfig {
    let mut log_config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    log_config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        log_config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    log_config.format = match cli.log_format {
        Some(LogFormatArg::Pretty) => LogFormat::Pretty,
        Some(LogFormatArg::Compact) => LogFormat::Compact,
        Some(LogFormatArg::Json) => LogFormat::Json,
        None => config.logging.format.unwrap_or_default(),
    };
    log_config.log_file = cli.log_file.clone().or_else(|| config.logging.file.clone());
    log_config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => log_config.log_file.is_none() && io::stderr().is_terminal(),
    };
    log_config
}
