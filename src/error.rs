//! Error types shared by the loader, the statistics library and the pipelines
//!
//! Degenerate data is never an error here: empty inputs, malformed lines and
//! invalid records all have documented defaults. These types cover the cases
//! a caller must act on.

use crate::table::Column;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading a dataset from disk
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("error opening file: {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The loaded headers do not match what a pipeline needs
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("required column '{}' is missing from the header row", .0.header())]
    MissingColumn(Column),
}

/// Errors from the statistics library
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error("vector length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },
}

/// Invalid analysis configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("age band minimum {min} is greater than maximum {max}")]
    InvertedAgeBand { min: u32, max: u32 },

    #[error("min_time_spent_hour must be finite, got {0}")]
    NonFiniteThreshold(f64),

    #[error("cohort_profession must not be empty")]
    EmptyCohortProfession,
}

/// Failures a pipeline reports to its caller
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Stats(#[from] StatsError),
}
