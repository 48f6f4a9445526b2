// Geographic and age-band analysis
//
// Works on every loaded row; the cohort validator is not applied here.
// A row whose numeric field does not parse is left out of the operation
// that needs that number and nothing else.
//
// Outputs:
// - in-debt heavy users of one country, sorted by numeric id
// - distinct countries inside an age band
// - time spent, income spread and least engaged demographic inside the band
// - age/income correlation on the most popular platform

mod age_band;
mod country;
mod platform;

pub use age_band::{age_stats, AgeBandStats};
pub use country::{sort_users_by_country, unique_countries, Debtor};
pub use platform::{popular_platform_correlation, PopularPlatform};

use crate::config::{AgeBand, AnalysisConfig};
use crate::error::AnalysisError;
use crate::table::{Column, Table};
use serde::Serialize;
use tracing::{debug, info};

/// Columns read by this pipeline; their absence is a schema error
pub const REQUIRED_COLUMNS: [Column; 8] = [
    Column::Age,
    Column::Id,
    Column::Income,
    Column::TimeSpentHour,
    Column::Platform,
    Column::Country,
    Column::Indebt,
    Column::Demographics,
];

/// Result of the geographic pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeoReport {
    pub debtors: Vec<Debtor>,
    pub countries: Vec<String>,
    pub age_stats: AgeBandStats,
    pub popular_platform: Option<PopularPlatform>,
}

impl GeoReport {
    /// Correlation on the most popular platform, `0.0` when there were no rows
    pub fn platform_correlation(&self) -> f64 {
        self.popular_platform
            .as_ref()
            .map_or(0.0, |popular| popular.correlation)
    }
}

/// Run the geographic pipeline over a loaded table
///
/// An empty table yields an empty report.
pub fn analyze(table: &Table, config: &AnalysisConfig) -> Result<GeoReport, AnalysisError> {
    if table.is_empty() {
        info!("geographic analysis skipped: no data rows");
        return Ok(GeoReport::default());
    }
    table.require(&REQUIRED_COLUMNS)?;

    let report = GeoReport {
        debtors: sort_users_by_country(table, &config.country, config.min_time_spent_hour),
        countries: unique_countries(table, config.age_band),
        age_stats: age_stats(table, config.age_band),
        popular_platform: popular_platform_correlation(table)?,
    };

    info!(
        debtors = report.debtors.len(),
        countries = report.countries.len(),
        "geographic analysis complete"
    );
    Ok(report)
}

/// Integer age as the row states it (sign and surrounding blanks allowed)
fn parse_age(raw: &str) -> Option<i64> {
    let age = raw.trim().parse().ok();
    if age.is_none() {
        debug!(age = raw, "skipping row with non-integer age");
    }
    age
}

fn parse_float(raw: &str, column: Column) -> Option<f64> {
    let value = raw.trim().parse::<f64>().ok().filter(|v| v.is_finite());
    if value.is_none() {
        debug!(column = column.header(), value = raw, "skipping row with non-numeric field");
    }
    value
}

fn in_band(raw_age: &str, band: AgeBand) -> bool {
    parse_age(raw_age)
        .and_then(|age| u32::try_from(age).ok())
        .is_some_and(|age| band.contains(age))
}

#[cfg(test)]
mod tests;
