//! Configuration precedence: defaults, then the TOML file, then flags.

use std::fs;
use std::path::{Path, PathBuf};

use tabprep_cli::config::ConfigArgs;
use tabprep_model::{PipelineConfig, UnknownCategoryPolicy};
use tempfile::TempDir;

const CONFIG: &str = r#"
[ingestion]
source_path = "from_file.csv"
eval_ratio = 0.25
seed = 7

[transformation]
unknown_categories = "error"
"#;

fn config_file(dir: &Path) -> PathBuf {
    let path = dir.join("tabprep.toml");
    fs::write(&path, CONFIG).unwrap();
    path
}

#[test]
fn file_values_replace_defaults() {
    let dir = TempDir::new().unwrap();
    let args = ConfigArgs {
        config: Some(config_file(dir.path())),
        ..ConfigArgs::default()
    };

    let config = args.resolve().unwrap();

    assert_eq!(config.ingestion.source_path, Path::new("from_file.csv"));
    assert_eq!(config.ingestion.eval_ratio, 0.25);
    assert_eq!(config.ingestion.seed, 7);
    assert_eq!(
        config.transformation.unknown_categories,
        UnknownCategoryPolicy::Error
    );
    // Omitted keys keep their defaults
    assert_eq!(config.schema, PipelineConfig::default().schema);
}

#[test]
fn flags_override_file_values() {
    let dir = TempDir::new().unwrap();
    let args = ConfigArgs {
        config: Some(config_file(dir.path())),
        source: Some(PathBuf::from("from_flag.csv")),
        artifacts_dir: Some(dir.path().join("out")),
    };

    let config = args.resolve().unwrap();

    assert_eq!(config.ingestion.source_path, Path::new("from_flag.csv"));
    assert_eq!(config.ingestion.raw_data_path, dir.path().join("out/data.csv"));
    assert_eq!(config.ingestion.seed, 7);
}

#[test]
fn resolved_config_renders_as_toml() {
    let dir = TempDir::new().unwrap();
    let args = ConfigArgs {
        config: Some(config_file(dir.path())),
        ..ConfigArgs::default()
    };

    let rendered = args.resolve().unwrap().to_toml().unwrap();

    assert!(rendered.contains("seed = 7"));
    assert!(rendered.contains("unknown_categories = \"error\""));
    assert!(rendered.contains("target_column = \"math score\""));
}

#[test]
fn malformed_file_names_the_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[ingestion\nseed = ").unwrap();
    let args = ConfigArgs {
        config: Some(path),
        ..ConfigArgs::default()
    };

    let err = args.resolve().unwrap_err();

    assert!(err.to_string().contains("broken.toml"));
    assert!(err.chain().count() > 1);
}
