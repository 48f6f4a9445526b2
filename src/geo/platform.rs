use super::{parse_age, parse_float};
use crate::error::StatsError;
use crate::stats;
use crate::table::{Column, Table};
use serde::Serialize;
use std::collections::BTreeMap;

/// The platform with the most users and its age/income correlation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopularPlatform {
    pub platform: String,
    pub users: usize,
    pub correlation: f64,
}

/// Rows of one platform and the `(age, income)` pairs that parsed
#[derive(Debug, Default)]
struct PlatformRows {
    rows: usize,
    ages: Vec<f64>,
    incomes: Vec<f64>,
}

/// Pearson correlation (population convention) between age and income on
/// the platform with the most rows
///
/// Every row counts toward its platform; only rows with a parseable age and
/// income enter the correlation. Platform names are compared exactly as
/// written; ties go to the lexicographically smallest name. `None` when the
/// table has no rows.
pub fn popular_platform_correlation(table: &Table) -> Result<Option<PopularPlatform>, StatsError> {
    let mut platforms: BTreeMap<&str, PlatformRows> = BTreeMap::new();
    for record in table.records() {
        let entry = platforms.entry(record.platform).or_default();
        entry.rows += 1;

        if let (Some(age), Some(income)) = (
            parse_age(record.age),
            parse_float(record.income, Column::Income),
        ) {
            entry.ages.push(age as f64);
            entry.incomes.push(income);
        }
    }

    let mut popular: Option<(&str, &PlatformRows)> = None;
    for (name, rows) in &platforms {
        if popular.map_or(true, |(_, best)| rows.rows > best.rows) {
            popular = Some((*name, rows));
        }
    }

    let Some((name, rows)) = popular else {
        return Ok(None);
    };

    let correlation = stats::pearson_correlation(&rows.ages, &rows.incomes)?;
    Ok(Some(PopularPlatform {
        platform: name.to_string(),
        users: rows.rows,
        correlation: stats::round4(correlation),
    }))
}
