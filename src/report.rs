//! Rendering of analysis results as text or JSON

use crate::cli::Selection;
use crate::cohort::CohortReport;
use crate::config::AnalysisConfig;
use crate::geo::GeoReport;
use serde::Serialize;
use std::fmt::{self, Write};

/// Everything one invocation produced
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    #[serde(skip)]
    pub selection: Selection,
    /// Data rows accepted by the loader
    pub rows: usize,
    /// Lines dropped for a mismatched field count
    pub skipped_lines: usize,
    /// `None` when not selected or when there was no data
    pub cohort: Option<CohortReport>,
    /// `None` when not selected
    pub geo: Option<GeoReport>,
}

/// Pretty-printed JSON object with `rows`, `skipped_lines`, `cohort`, `geo`
pub fn render_json(report: &Report) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

/// Human-readable summary
pub fn render_text(report: &Report, config: &AnalysisConfig) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_report(&mut out, report, config);
    out
}

fn write_report(out: &mut String, report: &Report, config: &AnalysisConfig) -> fmt::Result {
    writeln!(
        out,
        "Loaded {} rows ({} malformed lines skipped)",
        report.rows, report.skipped_lines
    )?;

    if report.selection.includes_cohort() {
        writeln!(out)?;
        match &report.cohort {
            Some(cohort) => write_cohort(out, cohort)?,
            None => writeln!(out, "=== Cohort Analysis ===\nNo data.")?,
        }
    }

    if let Some(geo) = &report.geo {
        writeln!(out)?;
        write_geo(out, geo, config)?;
    }

    Ok(())
}

fn write_cohort(out: &mut String, report: &CohortReport) -> fmt::Result {
    let students = report.students.label();
    let non_students = report.non_students.label();

    writeln!(out, "=== Cohort Analysis ===")?;
    writeln!(
        out,
        "Records: {} accepted, {} rejected",
        report.validation.accepted, report.validation.rejected
    )?;
    for (reason, count) in &report.validation.reasons {
        writeln!(out, "  {}: {}", reason, count)?;
    }

    writeln!(
        out,
        "Cohorts: {} ({} members), {} ({} members)",
        students,
        report.students.members().len(),
        non_students,
        report.non_students.members().len()
    )?;

    writeln!(out, "\nEngagement time by platform:")?;
    writeln!(
        out,
        "{:<20} {:>12} {:>12} {:>12}",
        "platform", "sum", "mean", "std dev"
    )?;
    writeln!(out, "{:-<20} {:->12} {:->12} {:->12}", "", "", "", "")?;
    for (platform, stats) in &report.platform_stats {
        writeln!(
            out,
            "{:<20} {:>12.4} {:>12.4} {:>12.4}",
            platform, stats.sum, stats.mean, stats.std_dev
        )?;
    }

    writeln!(out, "\nCosine similarity (age, income):")?;
    writeln!(out, "  {:<20} {:.4}", students, report.cosine_similarity.student)?;
    writeln!(
        out,
        "  {:<20} {:.4}",
        non_students, report.cosine_similarity.non_student
    )?;
    writeln!(
        out,
        "\nCohen's d ({} vs {}): {:.4}",
        students, non_students, report.cohen_d
    )
}

fn write_geo(out: &mut String, report: &GeoReport, config: &AnalysisConfig) -> fmt::Result {
    let band = config.age_band;

    writeln!(out, "=== Geographic Analysis ===")?;
    writeln!(
        out,
        "In-debt users in '{}' spending more than {} h: {}",
        config.country,
        config.min_time_spent_hour,
        report.debtors.len()
    )?;
    for debtor in &report.debtors {
        writeln!(out, "  {:<12} {:>12.2}", debtor.id, debtor.income)?;
    }

    let countries = if report.countries.is_empty() {
        "(none)".to_string()
    } else {
        report.countries.join(", ")
    };
    writeln!(
        out,
        "\nCountries with users aged {}-{}: {}",
        band.min, band.max, countries
    )?;

    let stats = &report.age_stats;
    writeln!(out, "\nAge band {}-{}:", band.min, band.max)?;
    writeln!(out, "  Average time spent:        {:.4}", stats.average_time_spent)?;
    writeln!(out, "  Income std dev:            {:.4}", stats.income_std_dev)?;
    writeln!(
        out,
        "  Least engaged demographic: {}",
        if stats.least_engaged_demographic.is_empty() {
            "(none)"
        } else {
            stats.least_engaged_demographic.as_str()
        }
    )?;

    match &report.popular_platform {
        Some(popular) => writeln!(
            out,
            "\nMost popular platform: {} ({} users), age/income correlation {:.4}",
            popular.platform, popular.users, popular.correlation
        ),
        None => writeln!(out, "\nMost popular platform: (none), age/income correlation 0"),
    }
}
