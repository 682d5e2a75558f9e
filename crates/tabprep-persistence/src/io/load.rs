//! Artifact loading operations.

use std::fs;
use std::path::Path;

use rkyv::util::AlignedVec;
use tabprep_transform::Preprocessor;

use crate::error::{PersistenceError, Result};
use crate::types::{
    CURRENT_SCHEMA_VERSION, FittedParamsSnapshot, MAGIC_BYTES, PreprocessorArtifact,
};

const HEADER_LEN: usize = 8;

/// Load a fitted preprocessor from a .tpp file.
pub fn load_preprocessor(path: &Path) -> Result<Preprocessor> {
    Ok(load_artifact(path)?.into_preprocessor())
}

/// Load the raw artifact, including its metadata.
pub fn load_artifact(path: &Path) -> Result<PreprocessorArtifact> {
    let bytes = fs::read(path).map_err(|e| PersistenceError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_artifact_bytes(&bytes, path)
}

/// Validate the header and deserialize the payload.
fn parse_artifact_bytes(bytes: &[u8], path: &Path) -> Result<PreprocessorArtifact> {
    // Minimum size: magic (4) + version (4) + some payload
    if bytes.len() < HEADER_LEN + 4 {
        return Err(PersistenceError::InvalidFormat {
            path: path.to_path_buf(),
            reason: "file too small".to_string(),
        });
    }

    if bytes[0..4] != MAGIC_BYTES {
        return Err(PersistenceError::InvalidFormat {
            path: path.to_path_buf(),
            reason: "not a tabprep artifact (invalid magic bytes)".to_string(),
        });
    }

    let version = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    if version > CURRENT_SCHEMA_VERSION {
        return Err(PersistenceError::UnsupportedVersion {
            found: version,
            max_supported: CURRENT_SCHEMA_VERSION,
            path: path.to_path_buf(),
        });
    }

    // The payload starts at offset 8 of a Vec<u8>; copy it so rkyv sees an
    // aligned buffer.
    let payload = &bytes[HEADER_LEN..];
    let mut aligned = AlignedVec::<16>::with_capacity(payload.len());
    aligned.extend_from_slice(payload);

    let artifact = rkyv::from_bytes::<PreprocessorArtifact, rkyv::rancor::Error>(&aligned)
        .map_err(|e| PersistenceError::Deserialization {
            path: path.to_path_buf(),
            source: Box::new(std::io::Error::other(format!(
                "rkyv deserialization failed: {e}"
            ))),
        })?;

    check_params(&artifact.params).map_err(|reason| PersistenceError::InvalidFormat {
        path: path.to_path_buf(),
        reason,
    })?;

    tracing::info!(
        path = %path.display(),
        numeric = artifact.params.numeric.len(),
        categorical = artifact.params.categorical.len(),
        "loaded preprocessor artifact"
    );
    Ok(artifact)
}

/// Learned parameters must be usable as-is: finite statistics, and a
/// strictly sorted vocabulary that contains the fill value.
fn check_params(params: &FittedParamsSnapshot) -> std::result::Result<(), String> {
    for column in &params.numeric {
        if ![column.fill_value, column.mean, column.std_dev]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(format!(
                "non-finite statistics for numeric column '{}'",
                column.column
            ));
        }
    }
    for column in &params.categorical {
        if !column.categories.windows(2).all(|pair| pair[0] < pair[1]) {
            return Err(format!(
                "categories of '{}' are not sorted and unique",
                column.column
            ));
        }
        if column.categories.binary_search(&column.fill_value).is_err() {
            return Err(format!(
                "fill value of '{}' is not one of its categories",
                column.column
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::save::serialize_artifact;
    use crate::types::{
        CategoricalColumnSnapshot, NumericColumnSnapshot, UnknownCategoryPolicySnapshot,
    };
    use tempfile::tempdir;

    fn artifact_with(categories: &[&str], fill_value: &str, mean: f64) -> PreprocessorArtifact {
        PreprocessorArtifact::new(
            FittedParamsSnapshot {
                numeric: vec![NumericColumnSnapshot {
                    column: "reading score".to_string(),
                    fill_value: 70.0,
                    mean,
                    std_dev: 14.5,
                }],
                categorical: vec![CategoricalColumnSnapshot {
                    column: "gender".to_string(),
                    fill_value: fill_value.to_string(),
                    categories: categories.iter().map(|c| c.to_string()).collect(),
                }],
                fitted_rows: 3,
            },
            UnknownCategoryPolicySnapshot::Ignore,
        )
    }

    fn write_artifact(artifact: &PreprocessorArtifact) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preprocessor.tpp");
        fs::write(&path, serialize_artifact(artifact).unwrap()).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_valid_params() {
        let (_dir, path) = write_artifact(&artifact_with(&["female", "male"], "female", 69.2));
        let artifact = load_artifact(&path).unwrap();
        assert_eq!(artifact.params.categorical[0].categories, vec!["female", "male"]);
    }

    #[test]
    fn test_load_rejects_unsorted_categories() {
        let (_dir, path) = write_artifact(&artifact_with(&["male", "female"], "male", 69.2));
        assert!(matches!(
            load_artifact(&path),
            Err(PersistenceError::InvalidFormat { ref reason, .. }) if reason.contains("gender")
        ));
    }

    #[test]
    fn test_load_rejects_duplicate_categories() {
        let (_dir, path) = write_artifact(&artifact_with(&["female", "female"], "female", 69.2));
        assert!(matches!(
            load_artifact(&path),
            Err(PersistenceError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_load_rejects_fill_value_outside_vocabulary() {
        let (_dir, path) = write_artifact(&artifact_with(&["female", "male"], "other", 69.2));
        assert!(matches!(
            load_artifact(&path),
            Err(PersistenceError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_load_rejects_infinite_mean() {
        let (_dir, path) = write_artifact(&artifact_with(&["female", "male"], "female", f64::INFINITY));
        assert!(matches!(
            load_artifact(&path),
            Err(PersistenceError::InvalidFormat { ref reason, .. }) if reason.contains("reading score")
        ));
    }

    #[test]
    fn test_load_invalid_magic() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid.tpp");

        fs::write(&path, b"NOT_A_TPP_FILE_DATA").unwrap();

        let result = load_artifact(&path);
        assert!(matches!(
            result,
            Err(PersistenceError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_load_too_small() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tiny.tpp");

        fs::write(&path, MAGIC_BYTES).unwrap();

        assert!(matches!(
            load_artifact(&path),
            Err(PersistenceError::InvalidFormat { ref reason, .. }) if reason == "file too small"
        ));
    }

    #[test]
    fn test_load_unsupported_version() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("future.tpp");

        let mut bytes = Vec::new();
        bytes.extend_from_slice(&MAGIC_BYTES);
        bytes.extend_from_slice(&999u32.to_le_bytes());
        bytes.extend_from_slice(&[0u8; 100]);

        fs::write(&path, bytes).unwrap();

        let result = load_artifact(&path);
        assert!(matches!(
            result,
            Err(PersistenceError::UnsupportedVersion { found: 999, .. })
        ));
    }

    #[test]
    fn test_load_corrupt_payload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("corrupt.tpp");

        let mut bytes = Vec::new();
        bytes.extend_from_slice(&MAGIC_BYTES);
        bytes.extend_from_slice(&CURRENT_SCHEMA_VERSION.to_le_bytes());
        bytes.extend_from_slice(&[0xAB; 64]);

        fs::write(&path, bytes).unwrap();

        assert!(matches!(
            load_artifact(&path),
            Err(PersistenceError::Deserialization { .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_artifact(Path::new("/nonexistent/preprocessor.tpp"));
        assert!(matches!(
            result,
            Err(PersistenceError::Io {
                operation: "read",
                ..
            })
        ));
    }
}
