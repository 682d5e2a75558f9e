//! Missing-value imputation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Replaces missing numeric values with the training median.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedianImputer {
    pub fill_value: f64,
}

impl MedianImputer {
    /// Learn the median of the observed values.
    ///
    /// An even count averages the two middle values. Returns `None` when every
    /// value is missing.
    pub fn fit(values: &[Option<f64>]) -> Option<Self> {
        let mut observed: Vec<f64> = values.iter().flatten().copied().collect();
        if observed.is_empty() {
            return None;
        }
        observed.sort_by(f64::total_cmp);

        let mid = observed.len() / 2;
        let fill_value = if observed.len() % 2 == 0 {
            (observed[mid - 1] + observed[mid]) / 2.0
        } else {
            observed[mid]
        };
        Some(Self { fill_value })
    }

    pub fn apply(&self, values: &[Option<f64>]) -> Vec<f64> {
        values
            .iter()
            .map(|v| v.unwrap_or(self.fill_value))
            .collect()
    }
}

/// Replaces missing categories with the most frequent training category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MostFrequentImputer {
    pub fill_value: String,
}

impl MostFrequentImputer {
    /// Learn the mode of the observed values.
    ///
    /// Ties go to the lexicographically smallest category. Returns `None` when
    /// every value is missing.
    pub fn fit(values: &[Option<String>]) -> Option<Self> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for value in values.iter().flatten() {
            *counts.entry(value.as_str()).or_default() += 1;
        }

        // BTreeMap iterates in ascending key order, so `>` keeps the first
        // (smallest) category among equal counts.
        let mut best: Option<(&str, usize)> = None;
        for (category, count) in counts {
            if best.is_none_or(|(_, best_count)| count > best_count) {
                best = Some((category, count));
            }
        }

        best.map(|(category, _)| Self {
            fill_value: category.to_string(),
        })
    }

    pub fn apply(&self, values: &[Option<String>]) -> Vec<String> {
        values
            .iter()
            .map(|v| v.clone().unwrap_or_else(|| self.fill_value.clone()))
            .collect()
    }
}
