//! Conversion traits between runtime types and persistence types.
//!
//! These traits define how to convert between the learned parameters held by
//! a fitted [`Preprocessor`] and serializable snapshots. Every snapshot carries
//! the full state, so conversion is lossless in both directions.

use tabprep_model::UnknownCategoryPolicy;
use tabprep_transform::steps::{
    MedianImputer, MostFrequentImputer, OneHotEncoder, StandardScaler,
};
use tabprep_transform::{
    CategoricalColumnParams, FittedParams, NumericColumnParams, PreprocessingOptions, Preprocessor,
};

use crate::error::{PersistenceError, Result};
use crate::types::{
    CategoricalColumnSnapshot, FittedParamsSnapshot, NumericColumnSnapshot, PreprocessorArtifact,
    UnknownCategoryPolicySnapshot,
};

/// Trait for types that can be converted to a persistence snapshot.
pub trait ToSnapshot {
    /// The snapshot type.
    type Snapshot;

    /// Convert to a snapshot for persistence.
    fn to_snapshot(&self) -> Self::Snapshot;
}

/// Trait for types that can be created from a persistence snapshot.
pub trait FromSnapshot: Sized {
    /// The snapshot type.
    type Snapshot;

    /// Create from a snapshot.
    fn from_snapshot(snapshot: Self::Snapshot) -> Self;
}

// =============================================================================
// POLICY
// =============================================================================

impl ToSnapshot for UnknownCategoryPolicy {
    type Snapshot = UnknownCategoryPolicySnapshot;

    fn to_snapshot(&self) -> Self::Snapshot {
        match self {
            Self::Ignore => UnknownCategoryPolicySnapshot::Ignore,
            Self::Error => UnknownCategoryPolicySnapshot::Error,
        }
    }
}

impl FromSnapshot for UnknownCategoryPolicy {
    type Snapshot = UnknownCategoryPolicySnapshot;

    fn from_snapshot(snapshot: Self::Snapshot) -> Self {
        match snapshot {
            UnknownCategoryPolicySnapshot::Ignore => Self::Ignore,
            UnknownCategoryPolicySnapshot::Error => Self::Error,
        }
    }
}

// =============================================================================
// COLUMN PARAMETERS
// =============================================================================

impl ToSnapshot for NumericColumnParams {
    type Snapshot = NumericColumnSnapshot;

    fn to_snapshot(&self) -> Self::Snapshot {
        NumericColumnSnapshot {
            column: self.column.clone(),
            fill_value: self.imputer.fill_value,
            mean: self.scaler.mean,
            std_dev: self.scaler.std_dev,
        }
    }
}

impl FromSnapshot for NumericColumnParams {
    type Snapshot = NumericColumnSnapshot;

    fn from_snapshot(snapshot: Self::Snapshot) -> Self {
        Self {
            column: snapshot.column,
            imputer: MedianImputer {
                fill_value: snapshot.fill_value,
            },
            scaler: StandardScaler {
                mean: snapshot.mean,
                std_dev: snapshot.std_dev,
            },
        }
    }
}

impl ToSnapshot for CategoricalColumnParams {
    type Snapshot = CategoricalColumnSnapshot;

    fn to_snapshot(&self) -> Self::Snapshot {
        CategoricalColumnSnapshot {
            column: self.column.clone(),
            fill_value: self.imputer.fill_value.clone(),
            categories: self.encoder.categories.clone(),
        }
    }
}

impl FromSnapshot for CategoricalColumnParams {
    type Snapshot = CategoricalColumnSnapshot;

    fn from_snapshot(snapshot: Self::Snapshot) -> Self {
        Self {
            column: snapshot.column,
            imputer: MostFrequentImputer {
                fill_value: snapshot.fill_value,
            },
            encoder: OneHotEncoder {
                categories: snapshot.categories,
            },
        }
    }
}

impl ToSnapshot for FittedParams {
    type Snapshot = FittedParamsSnapshot;

    fn to_snapshot(&self) -> Self::Snapshot {
        FittedParamsSnapshot {
            numeric: self.numeric.iter().map(ToSnapshot::to_snapshot).collect(),
            categorical: self.categorical.iter().map(ToSnapshot::to_snapshot).collect(),
            fitted_rows: self.fitted_rows as u64,
        }
    }
}

impl FromSnapshot for FittedParams {
    type Snapshot = FittedParamsSnapshot;

    fn from_snapshot(snapshot: Self::Snapshot) -> Self {
        Self {
            numeric: snapshot
                .numeric
                .into_iter()
                .map(NumericColumnParams::from_snapshot)
                .collect(),
            categorical: snapshot
                .categorical
                .into_iter()
                .map(CategoricalColumnParams::from_snapshot)
                .collect(),
            fitted_rows: usize::try_from(snapshot.fitted_rows).unwrap_or(usize::MAX),
        }
    }
}

// =============================================================================
// ARTIFACT
// =============================================================================

impl PreprocessorArtifact {
    /// Snapshot a fitted preprocessor.
    pub fn from_preprocessor(preprocessor: &Preprocessor) -> Result<Self> {
        let params = preprocessor
            .params()
            .map_err(|_| PersistenceError::NotFitted)?;
        Ok(Self::new(
            params.to_snapshot(),
            preprocessor.options().unknown_categories.to_snapshot(),
        ))
    }

    /// Rebuild the fitted preprocessor this artifact describes.
    pub fn into_preprocessor(self) -> Preprocessor {
        let options = PreprocessingOptions {
            unknown_categories: UnknownCategoryPolicy::from_snapshot(self.unknown_categories),
        };
        Preprocessor::from_params(options, FittedParams::from_snapshot(self.params))
    }
}
