//! Persistent storage for fitted preprocessors.
//!
//! This crate saves and loads `.tpp` artifacts so the model-training stage,
//! and later inference, can reuse exactly the transform learned from the
//! training split.
//!
//! # Features
//!
//! - **Zero-copy serialization** with rkyv, validated on load
//! - **Atomic writes** to prevent partially written artifacts
//! - **Artifact digests** via SHA-256 hashing
//!
//! # File Format
//!
//! `.tpp` files use a simple binary format:
//!
//! ```text
//! +------------------+
//! | Magic: "TPP\x01" | 4 bytes - file identification
//! +------------------+
//! | Version: 1       | 4 bytes - u32 little-endian schema version
//! +------------------+
//! | rkyv Payload     | Variable - PreprocessorArtifact
//! +------------------+
//! ```
//!
//! # Example
//!
//! ```ignore
//! use tabprep_persistence::{load_preprocessor, save_preprocessor};
//!
//! save_preprocessor(&fitted, Path::new("artifacts/preprocessor.tpp"))?;
//! let restored = load_preprocessor(Path::new("artifacts/preprocessor.tpp"))?;
//! ```
//!
//! # Architecture
//!
//! - `types/` - rkyv-serializable snapshots
//! - `io/` - File I/O operations (save, load, hash)
//! - `convert.rs` - Conversion between runtime params and snapshots
//! - `error.rs` - Error types with remediation hints

mod convert;
mod error;
mod io;
mod types;

pub use convert::{FromSnapshot, ToSnapshot};
pub use error::{PersistenceError, Result};
pub use io::{
    compute_file_hash, load_artifact, load_preprocessor, save_preprocessor, verify_file_hash,
};
pub use types::{
    CURRENT_SCHEMA_VERSION, CategoricalColumnSnapshot, FittedParamsSnapshot, MAGIC_BYTES,
    NumericColumnSnapshot, PreprocessorArtifact, UnknownCategoryPolicySnapshot,
};
