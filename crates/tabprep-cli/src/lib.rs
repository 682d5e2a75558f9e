//! CLI library components for tabprep.

pub mod config;
pub mod logging;
