//! Single-column preprocessing steps.
//!
//! Each step is its own learned state: `fit` reads training values and
//! returns the step, `apply` maps values through it without changing it.

mod encode;
mod impute;
mod scale;

pub use encode::{EncodedBlock, OneHotEncoder};
pub use impute::{MedianImputer, MostFrequentImputer};
pub use scale::StandardScaler;
