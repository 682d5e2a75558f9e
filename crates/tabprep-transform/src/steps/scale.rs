//! Standardization.

use serde::{Deserialize, Serialize};

/// Centers a column on the training mean and divides by the training
/// population standard deviation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: f64,
    pub std_dev: f64,
}

impl StandardScaler {
    /// Learn mean and population standard deviation. Expects imputed values.
    pub fn fit(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                mean: 0.0,
                std_dev: 0.0,
            };
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        Self {
            mean,
            std_dev: variance.sqrt(),
        }
    }

    /// Divisor applied after centering; a constant column scales by 1.
    pub fn scale(&self) -> f64 {
        if self.std_dev == 0.0 { 1.0 } else { self.std_dev }
    }

    pub fn apply(&self, values: &[f64]) -> Vec<f64> {
        let scale = self.scale();
        values.iter().map(|v| (v - self.mean) / scale).collect()
    }
}
