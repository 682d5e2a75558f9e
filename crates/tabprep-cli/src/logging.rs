//! Logging infrastructure using `tracing` and `tracing-subscriber`.
//!
//! Every invocation writes its log records to one file. By default that is a
//! fresh `logs/<MM_DD_YY_HH_MM_SS>.log`; `--log-file` names an explicit
//! file, which is appended to. Records are lifecycle milestones from the
//! library crates; nothing reads them back.
//!
//! # Log Levels
//!
//! - `error`: the failure that ended a command
//! - `warn`: recoverable surprises, such as unseen categories
//! - `info`: stage start/finish, row and column counts, durations
//! - `debug`: per-step detail
//!
//! # Usage
//!
//! ```ignore
//! use tabprep_cli::logging::{init_logging, LogConfig};
//!
//! let session = init_logging(&LogConfig::default())?;
//! println!("logging to {}", session.log_path().display());
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Default directory for per-run log files.
pub const DEFAULT_LOGS_DIR: &str = "logs";

/// Crates whose records pass the configured level; everything else stays at warn.
const OWN_CRATES: [&str; 7] = [
    "tabprep",
    "tabprep_cli",
    "tabprep_core",
    "tabprep_ingest",
    "tabprep_model",
    "tabprep_persistence",
    "tabprep_transform",
];

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Maximum level recorded for tabprep crates.
    pub level_filter: LevelFilter,
    /// Let `RUST_LOG` replace `level_filter` when it is set.
    pub use_env_filter: bool,
    /// Include the module path in each record.
    pub with_target: bool,
    /// Emit ANSI colors.
    pub with_ansi: bool,
    /// Output format.
    pub format: LogFormat,
    /// Explicit log file. When `None` a timestamped file is created in `logs_dir`.
    pub log_file: Option<PathBuf>,
    /// Directory for timestamped log files.
    pub logs_dir: PathBuf,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-field human-readable records.
    #[default]
    Pretty,
    /// Single-line records.
    Compact,
    /// One JSON object per record.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::INFO,
            use_env_filter: true,
            with_target: false,
            with_ansi: false,
            format: LogFormat::default(),
            log_file: None,
            logs_dir: PathBuf::from(DEFAULT_LOGS_DIR),
        }
    }
}

impl LogConfig {
    /// Where records for a run started at `started` will be written.
    pub fn log_path(&self, started: DateTime<Local>) -> PathBuf {
        match &self.log_file {
            Some(path) => path.clone(),
            None => self.logs_dir.join(log_file_name(started)),
        }
    }
}

/// Handle to the installed subscriber. Lives for the whole process.
#[derive(Debug, Clone)]
pub struct LogSession {
    log_path: PathBuf,
}

impl LogSession {
    /// File receiving this process's log records.
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}

/// File name for a run started at `started`: `MM_DD_YY_HH_MM_SS.log`.
pub fn log_file_name(started: DateTime<Local>) -> String {
    started.format("%m_%d_%y_%H_%M_%S.log").to_string()
}

/// Open the run's log file and install the global subscriber.
///
/// # Errors
///
/// Returns an error if the log file or its directory cannot be created, or
/// if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> io::Result<LogSession> {
    let log_path = config.log_path(Local::now());
    let file = open_log_file(&log_path)?;
    init_logging_with_writer(config, SharedFileWriter::new(file))?;
    Ok(LogSession { log_path })
}

/// Install the global subscriber writing to `writer`.
pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W) -> io::Result<()>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let filter = build_env_filter(config.level_filter, config.use_env_filter);
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_target(config.with_target)
                    .with_span_events(fmt::format::FmtSpan::CLOSE),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_writer(writer)
                    .with_ansi(config.with_ansi)
                    .with_target(config.with_target),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_writer(writer)
                    .with_ansi(config.with_ansi)
                    .with_target(config.with_target),
            )
            .try_init(),
    };
    installed.map_err(io::Error::other)
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

#[derive(Clone)]
struct SharedFileWriter {
    file: Arc<Mutex<File>>,
}

impl SharedFileWriter {
    fn new(file: File) -> Self {
        Self {
            file: Arc::new(Mutex::new(file)),
        }
    }
}

struct SharedFileGuard {
    file: Arc<Mutex<File>>,
}

impl Write for SharedFileGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        guard.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        guard.flush()
    }
}

impl<'a> MakeWriter<'a> for SharedFileWriter {
    type Writer = SharedFileGuard;

    fn make_writer(&'a self) -> Self::Writer {
        SharedFileGuard {
            file: Arc::clone(&self.file),
        }
    }
}

fn build_env_filter(level: LevelFilter, use_env_filter: bool) -> EnvFilter {
    if use_env_filter && let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::new(default_directives(level))
}

fn default_directives(level: LevelFilter) -> String {
    let level = level.to_string().to_lowercase();
    let mut directives = vec!["warn".to_string()];
    directives.extend(OWN_CRATES.iter().map(|krate| format!("{krate}={level}")));
    directives.join(",")
}
