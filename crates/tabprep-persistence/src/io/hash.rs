//! SHA-256 digests of written artifacts.

use std::fs::File;
use std::io;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{PersistenceError, Result};

/// Lowercase hex SHA-256 of the file at `path`.
pub fn compute_file_hash(path: &Path) -> Result<String> {
    let read_error = |source: io::Error| PersistenceError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(read_error)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher).map_err(read_error)?;
    Ok(hex::encode(hasher.finalize()))
}

/// Whether the file at `path` has digest `expected` (hex, any case).
pub fn verify_file_hash(path: &Path, expected: &str) -> Result<bool> {
    Ok(compute_file_hash(path)?.eq_ignore_ascii_case(expected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_known_digest() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("abc.bin");
        fs::write(&path, b"abc").unwrap();

        assert_eq!(
            compute_file_hash(&path).unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_verify_ignores_case() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("train.csv");
        fs::write(&path, "math score,reading score\n72,72\n").unwrap();
        let digest = compute_file_hash(&path).unwrap();

        assert!(verify_file_hash(&path, &digest.to_uppercase()).unwrap());
        assert!(!verify_file_hash(&path, "00").unwrap());
    }

    #[test]
    fn test_missing_file() {
        let err = compute_file_hash(Path::new("/nonexistent/preprocessor.tpp")).unwrap_err();
        assert!(matches!(err, PersistenceError::Io { operation: "read", .. }));
    }
}
