//! engagestat - Cohort, platform and age-band statistics for platform usage datasets
//!
//! This library loads a delimited usage dataset once and runs two read-only
//! analyses over it: a cohort pipeline (validated records, per-platform
//! engagement, cosine similarity, Cohen's d) and a geographic pipeline
//! (in-debt heavy users per country, age-band statistics, Pearson correlation
//! on the most popular platform). Both share one statistics library.

pub mod cli;
pub mod cohort;
pub mod config;
pub mod error;
pub mod geo;
pub mod pipeline;
pub mod report;
pub mod stats;
pub mod table;
pub mod validate;
