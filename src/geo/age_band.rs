use super::{in_band, parse_float};
use crate::config::AgeBand;
use crate::stats;
use crate::table::{Column, Table};
use serde::Serialize;
use std::collections::BTreeMap;

/// `[average time spent, income std dev, least engaged demographic]`
///
/// All zeros and an empty label when no row falls in the band.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AgeBandStats {
    pub average_time_spent: f64,
    pub income_std_dev: f64,
    pub least_engaged_demographic: String,
}

/// Time spent, income spread and the demographic with the lowest average
/// time spent among users inside `band`
///
/// Demographic labels are trimmed and lower-cased; ties on the average go
/// to the lexicographically smallest label.
pub fn age_stats(table: &Table, band: AgeBand) -> AgeBandStats {
    let mut times = Vec::new();
    let mut incomes = Vec::new();
    let mut by_demographic: BTreeMap<String, Vec<f64>> = BTreeMap::new();

    for record in table.records().filter(|record| in_band(record.age, band)) {
        let (Some(time), Some(income)) = (
            parse_float(record.time_spent_hour, Column::TimeSpentHour),
            parse_float(record.income, Column::Income),
        ) else {
            continue;
        };

        times.push(time);
        incomes.push(income);
        by_demographic
            .entry(record.demographics.trim().to_lowercase())
            .or_default()
            .push(time);
    }

    if times.is_empty() {
        return AgeBandStats::default();
    }

    let income_mean = stats::mean(&incomes);

    // BTreeMap iterates labels in order, so keeping only strictly lower
    // averages leaves ties with the smallest label.
    let mut least_engaged: Option<(&str, f64)> = None;
    for (label, label_times) in &by_demographic {
        let average = stats::mean(label_times);
        if least_engaged.map_or(true, |(_, lowest)| average < lowest) {
            least_engaged = Some((label.as_str(), average));
        }
    }

    AgeBandStats {
        average_time_spent: stats::round4(stats::mean(&times)),
        income_std_dev: stats::round4(stats::sample_std_dev(&incomes, income_mean)),
        least_engaged_demographic: least_engaged
            .map(|(label, _)| label.to_string())
            .unwrap_or_default(),
    }
}
