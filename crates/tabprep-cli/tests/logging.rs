//! Log session setup. Installs the global subscriber, so it lives in its own
//! test binary.

use std::fs;

use tabprep_cli::logging::{LogConfig, init_logging};
use tempfile::TempDir;
use tracing::info;
use tracing::level_filters::LevelFilter;

#[test]
fn session_writes_timestamped_file() {
    let dir = TempDir::new().unwrap();
    let config = LogConfig {
        level_filter: LevelFilter::INFO,
        use_env_filter: false,
        logs_dir: dir.path().join("logs"),
        ..LogConfig::default()
    };

    let session = init_logging(&config).unwrap();
    info!(target: "tabprep_cli", rows = 3, "dataset loaded");

    let path = session.log_path();
    assert_eq!(path.parent(), Some(dir.path().join("logs").as_path()));
    let name = path.file_name().unwrap().to_str().unwrap();
    assert!(name.ends_with(".log"));
    // MM_DD_YY_HH_MM_SS
    assert_eq!(name.trim_end_matches(".log").split('_').count(), 6);

    let contents = fs::read_to_string(path).unwrap();
    assert!(contents.contains("dataset loaded"));

    // A second global subscriber is refused
    assert!(init_logging(&config).is_err());
}
