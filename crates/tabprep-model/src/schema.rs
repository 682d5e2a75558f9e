//! Column-group schema for the preprocessing stage.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Declares how dataset columns are used.
///
/// Numeric and categorical columns are feature groups; their declared order is
/// the order of the preprocessed output. The target column is carried through
/// untouched and appended as the last matrix column. Columns not named here are
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schema {
    /// Numeric feature columns, imputed with the median then standardized.
    pub numeric_columns: Vec<String>,

    /// Categorical feature columns, imputed with the mode then one-hot encoded.
    pub categorical_columns: Vec<String>,

    /// Column the downstream model predicts.
    pub target_column: String,
}

impl Default for Schema {
    fn default() -> Self {
        Self::student_performance()
    }
}

impl Schema {
    /// Create a schema from explicit column groups.
    pub fn new<N, C>(numeric: N, categorical: C, target: impl Into<String>) -> Self
    where
        N: IntoIterator,
        N::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            numeric_columns: numeric.into_iter().map(Into::into).collect(),
            categorical_columns: categorical.into_iter().map(Into::into).collect(),
            target_column: target.into(),
        }
    }

    /// Schema of the student performance dataset the pipeline ships with.
    pub fn student_performance() -> Self {
        Self::new(
            ["writing score", "reading score"],
            [
                "gender",
                "race/ethnicity",
                "parental level of education",
                "lunch",
                "test preparation course",
            ],
            "math score",
        )
    }

    /// Check that the column groups are well formed.
    ///
    /// The target must be non-empty and absent from both feature groups, the
    /// groups must be disjoint and free of duplicates, and at least one feature
    /// must be declared.
    pub fn validate(&self) -> Result<()> {
        if self.target_column.trim().is_empty() {
            return Err(ConfigError::EmptyTarget);
        }
        if self.numeric_columns.is_empty() && self.categorical_columns.is_empty() {
            return Err(ConfigError::NoFeatures);
        }

        let numeric = unique_group(&self.numeric_columns, "numeric")?;
        let categorical = unique_group(&self.categorical_columns, "categorical")?;

        if let Some(column) = numeric.intersection(&categorical).next() {
            return Err(ConfigError::OverlappingColumn {
                column: (*column).to_string(),
            });
        }
        if numeric.contains(self.target_column.as_str())
            || categorical.contains(self.target_column.as_str())
        {
            return Err(ConfigError::TargetInFeatures {
                column: self.target_column.clone(),
            });
        }
        Ok(())
    }

    /// All feature columns, numeric first, each group in declared order.
    pub fn feature_columns(&self) -> impl Iterator<Item = &str> {
        self.numeric_columns
            .iter()
            .chain(self.categorical_columns.iter())
            .map(String::as_str)
    }

    /// Every column the schema requires in a loaded split (features and target).
    pub fn required_columns(&self) -> impl Iterator<Item = &str> {
        self.feature_columns()
            .chain(std::iter::once(self.target_column.as_str()))
    }
}

fn unique_group<'a>(columns: &'a [String], group: &'static str) -> Result<BTreeSet<&'a str>> {
    let mut seen = BTreeSet::new();
    for column in columns {
        if !seen.insert(column.as_str()) {
            return Err(ConfigError::DuplicateColumn {
                column: column.clone(),
                group,
            });
        }
    }
    Ok(seen)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schema_is_valid() {
        let schema = Schema::default();
        schema.validate().unwrap();
        assert_eq!(schema.target_column, "math score");
        assert_eq!(schema.numeric_columns.len(), 2);
        assert_eq!(schema.categorical_columns.len(), 5);
    }

    #[test]
    fn test_overlap_rejected() {
        let schema = Schema::new(["a", "b"], ["b", "c"], "y");
        assert!(matches!(
            schema.validate(),
            Err(ConfigError::OverlappingColumn { column }) if column == "b"
        ));
    }

    #[test]
    fn test_target_in_features_rejected() {
        let schema = Schema::new(["a"], ["y"], "y");
        assert!(matches!(
            schema.validate(),
            Err(ConfigError::TargetInFeatures { .. })
        ));
    }

    #[test]
    fn test_duplicate_rejected() {
        let schema = Schema::new(["a", "a"], Vec::<String>::new(), "y");
        assert!(matches!(
            schema.validate(),
            Err(ConfigError::DuplicateColumn { group: "numeric", .. })
        ));
    }

    #[test]
    fn test_empty_schema_rejected() {
        let schema = Schema::new(Vec::<String>::new(), Vec::<String>::new(), "y");
        assert!(matches!(schema.validate(), Err(ConfigError::NoFeatures)));

        let schema = Schema::new(["a"], Vec::<String>::new(), " ");
        assert!(matches!(schema.validate(), Err(ConfigError::EmptyTarget)));
    }

    #[test]
    fn test_required_columns_order() {
        let schema = Schema::new(["n1", "n2"], ["c1"], "y");
        let required: Vec<&str> = schema.required_columns().collect();
        assert_eq!(required, vec!["n1", "n2", "c1", "y"]);
    }
}
