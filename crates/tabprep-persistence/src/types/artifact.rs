//! Root artifact type.

use chrono::{DateTime, Utc};
use rkyv::{Archive, Deserialize, Serialize};

use super::FittedParamsSnapshot;

/// Root artifact structure.
///
/// This is the top-level type that gets serialized to .tpp files.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
pub struct PreprocessorArtifact {
    /// Schema version (for future migrations).
    pub schema_version: u32,

    /// When the artifact was written (RFC 3339).
    pub created_at: String,

    /// Version of the tool that wrote the artifact.
    pub tool_version: String,

    /// Handling of categories unseen at fit time.
    pub unknown_categories: UnknownCategoryPolicySnapshot,

    /// Learned parameters.
    pub params: FittedParamsSnapshot,
}

impl PreprocessorArtifact {
    /// Create an artifact stamped with the current time.
    pub fn new(
        params: FittedParamsSnapshot,
        unknown_categories: UnknownCategoryPolicySnapshot,
    ) -> Self {
        Self {
            schema_version: super::CURRENT_SCHEMA_VERSION,
            created_at: Utc::now().to_rfc3339(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            unknown_categories,
            params,
        }
    }

    /// Parse the created_at timestamp.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Unknown-category policy for serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Archive, Serialize, Deserialize)]
pub enum UnknownCategoryPolicySnapshot {
    #[default]
    Ignore,
    Error,
}
