//! Artifact saving operations.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use tabprep_transform::Preprocessor;

use crate::error::{PersistenceError, Result};
use crate::types::{CURRENT_SCHEMA_VERSION, MAGIC_BYTES, PreprocessorArtifact};

/// Save a fitted preprocessor to a .tpp file.
///
/// Fails with [`PersistenceError::NotFitted`] for an unfit preprocessor.
/// Uses atomic write (temp file + rename) so a crash never leaves a
/// truncated artifact at `path`.
pub fn save_preprocessor(preprocessor: &Preprocessor, path: &Path) -> Result<()> {
    let artifact = PreprocessorArtifact::from_preprocessor(preprocessor)?;
    let bytes = serialize_artifact(&artifact)?;

    let temp_path = path.with_extension("tpp.tmp");

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| PersistenceError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let mut file = File::create(&temp_path).map_err(|e| PersistenceError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;

    file.write_all(&bytes).map_err(|e| PersistenceError::Io {
        operation: "write",
        path: temp_path.clone(),
        source: e,
    })?;

    file.sync_all().map_err(|e| PersistenceError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| PersistenceError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(
        path = %path.display(),
        bytes = bytes.len(),
        "saved preprocessor artifact"
    );
    Ok(())
}

/// Serialize an artifact to bytes.
///
/// Format:
/// - 4 bytes: Magic ("TPP\x01")
/// - 4 bytes: Schema version (u32 little-endian)
/// - N bytes: rkyv payload
pub(super) fn serialize_artifact(artifact: &PreprocessorArtifact) -> Result<Vec<u8>> {
    let rkyv_bytes = rkyv::to_bytes::<rkyv::rancor::Error>(artifact).map_err(|e| {
        PersistenceError::Serialization {
            source: Box::new(std::io::Error::other(format!(
                "rkyv serialization failed: {e}"
            ))),
        }
    })?;

    let mut output = Vec::with_capacity(8 + rkyv_bytes.len());
    output.extend_from_slice(&MAGIC_BYTES);
    output.extend_from_slice(&CURRENT_SCHEMA_VERSION.to_le_bytes());
    output.extend_from_slice(&rkyv_bytes);

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;
    use tabprep_model::Schema;
    use tabprep_transform::PreprocessingBuilder;
    use tempfile::tempdir;

    #[test]
    fn test_save_preprocessor() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("preprocessor.tpp");

        let df = df!("x" => [1.0, 2.0], "c" => ["a", "b"]).unwrap();
        let mut preprocessor = PreprocessingBuilder::default()
            .build(&Schema::new(["x"], ["c"], "y"))
            .unwrap();
        preprocessor.fit(&df).unwrap();

        save_preprocessor(&preprocessor, &path).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tpp.tmp").exists());

        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[0..4], &MAGIC_BYTES);
        assert_eq!(&bytes[4..8], &1u32.to_le_bytes());
    }

    #[test]
    fn test_save_unfit_writes_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preprocessor.tpp");
        let preprocessor = PreprocessingBuilder::default()
            .build(&Schema::new(["x"], ["c"], "y"))
            .unwrap();

        assert!(matches!(
            save_preprocessor(&preprocessor, &path),
            Err(PersistenceError::NotFitted)
        ));
        assert!(!path.exists());
    }
}
