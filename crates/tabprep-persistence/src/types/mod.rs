//! Persistence types for artifact serialization.
//!
//! These types are designed for zero-copy deserialization with rkyv.
//! They mirror the learned parameters of `tabprep-transform` but are
//! optimized for storage.

mod artifact;
mod params;

pub use artifact::{PreprocessorArtifact, UnknownCategoryPolicySnapshot};
pub use params::{CategoricalColumnSnapshot, FittedParamsSnapshot, NumericColumnSnapshot};

/// Current schema version.
///
/// Increment this when making breaking changes to the persistence format.
/// The loader will reject files with version > CURRENT_SCHEMA_VERSION.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Magic bytes at the start of .tpp files.
///
/// Format: "TPP" + version byte (0x01 for v1)
pub const MAGIC_BYTES: [u8; 4] = [b'T', b'P', b'P', 0x01];
