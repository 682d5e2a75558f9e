//! CLI argument definitions for tabprep.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;
use tabprep_cli::config::ConfigArgs;

#[derive(Parser)]
#[command(
    name = "tabprep",
    version,
    about = "Tabular preprocessing pipeline - split, fit, and persist a feature transform",
    long_about = "Prepare a tabular dataset for model training.\n\n\
                  Snapshots and splits the raw CSV, fits imputation, scaling, and one-hot\n\
                  encoding on the training split only, and saves the fitted transform."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log record format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Append logs to this file instead of a new timestamped file.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Directory for timestamped log files.
    #[arg(long = "logs-dir", value_name = "DIR", default_value = "logs", global = true)]
    pub logs_dir: PathBuf,
}

#[derive(Subcommand)]
pub enum Command {
    /// Ingest, split, and transform a dataset; save the fitted preprocessor.
    Run(ConfigArgs),

    /// Show the parameters learned by a saved preprocessor.
    Inspect(InspectArgs),

    /// Transform a CSV file with a saved preprocessor.
    Apply(ApplyArgs),

    /// Print the effective configuration as TOML.
    Schema(ConfigArgs),
}

#[derive(Args)]
pub struct InspectArgs {
    /// Preprocessor artifact (`.tpp`).
    #[arg(value_name = "ARTIFACT")]
    pub artifact: PathBuf,

    /// Print JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct ApplyArgs {
    /// Preprocessor artifact (`.tpp`).
    #[arg(value_name = "ARTIFACT")]
    pub artifact: PathBuf,

    /// CSV file with the feature columns the artifact was fitted on.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Target column to append when present in the file.
    #[arg(long = "target", value_name = "COLUMN", default_value = "math score")]
    pub target: String,

    /// Number of leading rows to print.
    #[arg(long = "rows", value_name = "N", default_value_t = 5)]
    pub rows: usize,
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

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from([
            "tabprep",
            "run",
            "--source",
            "students.csv",
            "--artifacts-dir",
            "out",
        ])
        .unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.source, Some(PathBuf::from("students.csv")));
        assert_eq!(args.artifacts_dir, Some(PathBuf::from("out")));
        assert!(args.config.is_none());
    }

    #[test]
    fn test_parse_apply_defaults() {
        let cli = Cli::try_parse_from(["tabprep", "apply", "a.tpp", "test.csv"]).unwrap();
        let Command::Apply(args) = cli.command else {
            panic!("expected apply");
        };
        assert_eq!(args.target, "math score");
        assert_eq!(args.rows, 5);
    }

    #[test]
    fn test_global_log_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "tabprep",
            "inspect",
            "a.tpp",
            "--log-file",
            "run.log",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.log_file, Some(PathBuf::from("run.log")));
        assert!(matches!(cli.log_format, LogFormatArg::Json));
    }

    #[test]
    fn test_inspect_requires_artifact() {
        assert!(Cli::try_parse_from(["tabprep", "inspect"]).is_err());
    }
}
