//! File I/O operations for artifact persistence.
//!
//! This module handles:
//! - Saving fitted preprocessors with atomic writes
//! - Loading artifacts with format validation
//! - Artifact hashing so consumers can verify what they load

mod hash;
mod load;
mod save;

pub use hash::{compute_file_hash, verify_file_hash};
pub use load::{load_artifact, load_preprocessor};
pub use save::save_preprocessor;
