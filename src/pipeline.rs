//! Entry points that load a dataset and run one or both pipelines
//!
//! The table is loaded once per call. An unreadable source is reported by the
//! loader and analysed as an empty table, so callers see "no data" results
//! rather than an error.

use crate::cli::Selection;
use crate::cohort::{self, CohortReport};
use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::geo::{self, GeoReport};
use crate::report::Report;
use crate::table::{load_table, Table};
use std::path::Path;
use tracing::info_span;

/// Run the selected pipelines over an already loaded table
pub fn analyze_table(
    table: &Table,
    config: &AnalysisConfig,
    selection: Selection,
) -> Result<Report, AnalysisError> {
    let cohort = if selection.includes_cohort() {
        let _span = info_span!("cohort").entered();
        cohort::analyze(table, config)?
    } else {
        None
    };

    let geo = if selection.includes_geo() {
        let _span = info_span!("geo").entered();
        Some(geo::analyze(table, config)?)
    } else {
        None
    };

    Ok(Report {
        selection,
        rows: table.len(),
        skipped_lines: table.skipped_lines(),
        cohort,
        geo,
    })
}

/// Load `path` and run the selected pipelines
pub fn run<P: AsRef<Path>>(
    path: P,
    config: &AnalysisConfig,
    selection: Selection,
) -> Result<Report, AnalysisError> {
    let table = load_table(path, config.delimiter);
    analyze_table(&table, config, selection)
}

/// Cohort/platform/effect-size analysis of the file at `path`
///
/// `Ok(None)` when the file is unreadable or has no data rows.
pub fn run_cohort_pipeline<P: AsRef<Path>>(
    path: P,
    config: &AnalysisConfig,
) -> Result<Option<CohortReport>, AnalysisError> {
    let table = load_table(path, config.delimiter);
    cohort::analyze(&table, config)
}

/// Geographic/age-band analysis of the file at `path`
pub fn run_geo_pipeline<P: AsRef<Path>>(
    path: P,
    config: &AnalysisConfig,
) -> Result<GeoReport, AnalysisError> {
    let table = load_table(path, config.delimiter);
    geo::analyze(&table, config)
}
