//! Statistics library shared by both analysis pipelines
//!
//! Every function is total over its documented domain: degenerate input
//! (empty vectors, zero spread, zero magnitude) yields `0.0` instead of an
//! error or a NaN. The only error is a length mismatch between paired
//! vectors, which is reported instead of silently truncating.
//!
//! Two deviation conventions coexist on purpose:
//! - [`sample_std_dev`] divides by `n - 1` (platform spread, income spread,
//!   Cohen's d)
//! - [`population_std_dev`] divides by `n` (inside [`pearson_correlation`])
//!
//! Results are rounded with [`round4`] only when they are reported.

use crate::error::StatsError;

/// Number of decimal places used for reported statistics
pub const REPORT_PRECISION: i32 = 4;

/// Round to 4 decimal places
pub fn round4(value: f64) -> f64 {
    round_to(value, REPORT_PRECISION)
}

/// Round the exact binary value to `places` decimal places, ties to even
///
/// Decimal formatting rounds the exact expansion once; scaling by a power
/// of ten first would round twice and can turn 0.00375 (stored just below)
/// into 0.0038.
pub fn round_to(value: f64, places: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let places = usize::try_from(places).unwrap_or(0);
    format!("{value:.places$}").parse().unwrap_or(value)
}

/// Arithmetic mean, `0.0` for empty input
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn sum_squared_deviations(values: &[f64], mean: f64) -> f64 {
    values.iter().map(|x| (x - mean).powi(2)).sum()
}

/// Sample standard deviation (Bessel's correction), `0.0` when `n < 2`
pub fn sample_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    (sum_squared_deviations(values, mean) / (values.len() - 1) as f64).sqrt()
}

/// Population standard deviation, `0.0` for empty input
pub fn population_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    (sum_squared_deviations(values, mean) / values.len() as f64).sqrt()
}

fn check_lengths(a: &[f64], b: &[f64]) -> Result<(), StatsError> {
    if a.len() != b.len() {
        return Err(StatsError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(())
}

/// Cosine of the angle between two vectors
///
/// `0.0` when either vector has zero magnitude (no direction).
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Result<f64, StatsError> {
    check_lengths(a, b)?;

    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let magnitude_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let magnitude_b = b.iter().map(|y| y * y).sum::<f64>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return Ok(0.0);
    }
    Ok(dot / (magnitude_a * magnitude_b))
}

/// Pearson correlation using population covariance and deviations
///
/// `0.0` for empty input or when either variable has zero spread.
pub fn pearson_correlation(xs: &[f64], ys: &[f64]) -> Result<f64, StatsError> {
    check_lengths(xs, ys)?;
    if xs.is_empty() {
        return Ok(0.0);
    }

    let n = xs.len() as f64;
    let mean_x = mean(xs);
    let mean_y = mean(ys);
    let covariance = xs
        .iter()
        .zip(ys)
        .map(|(x, y)| (x - mean_x) * (y - mean_y))
        .sum::<f64>()
        / n;

    let std_x = population_std_dev(xs, mean_x);
    let std_y = population_std_dev(ys, mean_y);
    if std_x == 0.0 || std_y == 0.0 {
        return Ok(0.0);
    }
    Ok(covariance / (std_x * std_y))
}

/// Cohen's d effect size with pooled sample standard deviation, rounded
/// to 4 places
///
/// `0.0` when `nx + ny <= 2` or the pooled deviation is zero.
pub fn cohen_d(x: &[f64], y: &[f64]) -> f64 {
    let (nx, ny) = (x.len(), y.len());
    if nx + ny <= 2 {
        return 0.0;
    }

    let (mean_x, mean_y) = (mean(x), mean(y));
    let (std_x, std_y) = (sample_std_dev(x, mean_x), sample_std_dev(y, mean_y));

    // A group of size 0 contributes (0 - 1) * 0 = 0: its deviation is 0.
    let pooled_variance = ((nx as f64 - 1.0) * std_x.powi(2) + (ny as f64 - 1.0) * std_y.powi(2))
        / (nx + ny - 2) as f64;
    let pooled_std = pooled_variance.sqrt();

    if pooled_std == 0.0 || !pooled_std.is_finite() {
        return 0.0;
    }
    round4((mean_x - mean_y) / pooled_std)
}

/// Mean and sample deviation of one group, unrounded
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub sum: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl Summary {
    pub fn of(values: &[f64]) -> Self {
        let mean = mean(values);
        Self {
            count: values.len(),
            sum: values.iter().sum(),
            mean,
            std_dev: sample_std_dev(values, mean),
        }
    }
}
