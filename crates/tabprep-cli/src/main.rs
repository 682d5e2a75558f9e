//! tabprep CLI.

use std::error::Error as _;

use clap::{ColorChoice, Parser};
use tabprep_cli::logging::{LogConfig, LogFormat, LogSession, init_logging};
use tabprep_core::PipelineError;
use tracing::error;
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{artifact_json, run_apply, run_inspect, run_run, run_schema};
use crate::summary::{print_artifact, print_matrix_head, print_run_summary};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    let session = match init_logging(&log_config) {
        Ok(session) => session,
        Err(error) => {
            eprintln!("error: failed to initialize logging: {error}");
            std::process::exit(1);
        }
    };
    let exit_code = match execute(cli.command, &session) {
        Ok(()) => 0,
        Err(error) => {
            error!(error = %error, "command failed");
            report(&error);
            1
        }
    };
    std::process::exit(exit_code);
}

fn execute(command: Command, session: &LogSession) -> anyhow::Result<()> {
    match command {
        Command::Run(args) => {
            let run = run_run(&args)?;
            print_run_summary(&run, session.log_path());
        }
        Command::Inspect(args) => {
            let artifact = run_inspect(&args)?;
            if args.json {
                println!("{}", artifact_json(artifact)?);
            } else {
                print_artifact(&args.artifact, &artifact);
            }
        }
        Command::Apply(args) => {
            let matrix = run_apply(&args)?;
            print_matrix_head(&matrix, args.rows);
        }
        Command::Schema(args) => print!("{}", run_schema(&args)?),
    }
    Ok(())
}

/// Print the failure, its cause chain, and any remediation hint to stderr.
fn report(error: &anyhow::Error) {
    eprintln!("error: {error}");
    match error.downcast_ref::<PipelineError>() {
        Some(pipeline) => {
            // The stage error displays as its inner error, already printed above.
            let mut cause = pipeline.stage_error().source();
            while let Some(inner) = cause {
                eprintln!("  caused by: {inner}");
                cause = inner.source();
            }
            if let Some(hint) = pipeline.hint() {
                eprintln!("  hint: {hint}");
            }
        }
        None => {
            for cause in error.chain().skip(1) {
                eprintln!("  caused by: {cause}");
            }
        }
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        use_env_filter: !(cli.verbosity.is_present() || cli.log_level.is_some()),
        log_file: cli.log_file.clone(),
        logs_dir: cli.logs_dir.clone(),
        ..LogConfig::default()
    };
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    // Records always go to a file, so auto means no colors.
    config.with_ansi = matches!(cli.color.color, ColorChoice::Always);
    config
}
