// Cohort, platform and effect-size analysis
//
// Validated records are split into the configured profession cohort
// ("student" by default) and everyone else. Each cohort keeps an id-keyed
// member map and index-aligned age/income/engagement-time vectors; a
// separate per-platform map collects every record's engagement time.
//
// Outputs:
// - member maps for both cohorts
// - per-platform sum/mean/sample deviation of engagement time
// - cosine similarity of age and income within each cohort
// - Cohen's d between the cohorts' engagement times

mod aggregate;
mod group;

pub use aggregate::{CohortAggregator, CohortReport, CosinePair, PlatformStats, ValidationSummary};
pub use group::{Cohort, MemberProfile};

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::table::{Column, Table};
use tracing::info;

/// Columns read after validation; their absence is a schema error
pub const REQUIRED_COLUMNS: [Column; 4] = [
    Column::Income,
    Column::TimeSpentHour,
    Column::Profession,
    Column::Platform,
];

/// Run the cohort pipeline over a loaded table
///
/// Returns `Ok(None)` when the table has no rows (unreadable source or a
/// header-only file).
pub fn analyze(
    table: &Table,
    config: &AnalysisConfig,
) -> Result<Option<CohortReport>, AnalysisError> {
    if table.is_empty() {
        info!("cohort analysis skipped: no data rows");
        return Ok(None);
    }
    table.require(&REQUIRED_COLUMNS)?;

    let mut aggregator = CohortAggregator::new(&config.cohort_profession);
    for record in table.records() {
        aggregator.add(&record);
    }
    let report = aggregator.finish()?;

    info!(
        accepted = report.validation.accepted,
        rejected = report.validation.rejected,
        platforms = report.platform_stats.len(),
        "cohort analysis complete"
    );
    Ok(Some(report))
}
