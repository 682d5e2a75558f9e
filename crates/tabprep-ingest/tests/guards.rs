//! Input guards applied before a CSV file is parsed.

use std::fs;

use tabprep_ingest::{IngestError, check_file_size, validate_encoding};
use tempfile::TempDir;

#[test]
fn file_over_limit_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("students.csv");
    fs::write(&path, "gender,math score\nfemale,72\n").unwrap();

    assert!(check_file_size(&path, 1024).is_ok());
    assert!(matches!(
        check_file_size(&path, 8),
        Err(IngestError::FileTooLarge { max_size: 8, .. })
    ));
}

#[test]
fn utf16_input_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("students.csv");
    fs::write(&path, [0xFF, 0xFE, b'g', 0x00]).unwrap();

    assert!(matches!(
        validate_encoding(&path),
        Err(IngestError::UnsupportedEncoding { encoding: "UTF-16 LE", .. })
    ));
}
