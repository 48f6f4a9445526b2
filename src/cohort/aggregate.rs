use super::Cohort;
use crate::error::StatsError;
use crate::stats::{self, Summary};
use crate::table::UsageRecord;
use crate::validate::{self, InvalidReason, Validation};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::trace;

const NON_COHORT_PREFIX: &str = "non-";

/// Rounded `[sum, mean, sample std dev]` of one platform's engagement times
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlatformStats {
    pub sum: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl PlatformStats {
    pub fn from_values(values: &[f64]) -> Self {
        let summary = Summary::of(values);
        Self {
            sum: stats::round4(summary.sum),
            mean: stats::round4(summary.mean),
            std_dev: stats::round4(summary.std_dev),
        }
    }
}

/// Age/income cosine similarity per cohort
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CosinePair {
    pub student: f64,
    pub non_student: f64,
}

/// How many records were accepted and why the rest were not
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationSummary {
    pub accepted: usize,
    pub rejected: usize,
    pub reasons: BTreeMap<String, usize>,
}

impl ValidationSummary {
    fn reject(&mut self, reason: InvalidReason) {
        self.rejected += 1;
        *self.reasons.entry(reason.to_string()).or_insert(0) += 1;
    }
}

/// Result of the cohort pipeline
#[derive(Debug, Clone, Serialize)]
pub struct CohortReport {
    pub students: Cohort,
    pub non_students: Cohort,
    pub platform_stats: BTreeMap<String, PlatformStats>,
    pub cosine_similarity: CosinePair,
    pub cohen_d: f64,
    pub validation: ValidationSummary,
}

/// Single-pass accumulator behind [`super::analyze`]
#[derive(Debug)]
pub struct CohortAggregator {
    profession: String,
    students: Cohort,
    non_students: Cohort,
    platforms: BTreeMap<String, Vec<f64>>,
    validation: ValidationSummary,
}

impl CohortAggregator {
    /// `profession` is matched case-insensitively and exactly (no trimming)
    pub fn new(profession: &str) -> Self {
        let profession = profession.to_lowercase();
        Self {
            students: Cohort::new(profession.clone()),
            non_students: Cohort::new(format!("{NON_COHORT_PREFIX}{profession}")),
            profession,
            platforms: BTreeMap::new(),
            validation: ValidationSummary::default(),
        }
    }

    /// Validate one record and route it; invalid records are only counted
    pub fn add(&mut self, record: &UsageRecord<'_>) {
        let valid = match validate::validate(record) {
            Validation::Valid(valid) => valid,
            Validation::Invalid(reason) => {
                trace!(id = record.id, %reason, "record rejected");
                self.validation.reject(reason);
                return;
            }
        };
        self.validation.accepted += 1;

        let cohort = if valid.profession.to_lowercase() == self.profession {
            &mut self.students
        } else {
            &mut self.non_students
        };
        cohort.push(&valid);

        self.platforms
            .entry(valid.platform.to_lowercase())
            .or_default()
            .push(valid.engagement_time());
    }

    pub fn finish(self) -> Result<CohortReport, StatsError> {
        let platform_stats = self
            .platforms
            .iter()
            .map(|(platform, times)| (platform.clone(), PlatformStats::from_values(times)))
            .collect();

        let cosine_similarity = CosinePair {
            student: self.students.age_income_similarity()?,
            non_student: self.non_students.age_income_similarity()?,
        };

        let cohen_d = stats::cohen_d(
            self.students.engagement_times(),
            self.non_students.engagement_times(),
        );

        Ok(CohortReport {
            students: self.students,
            non_students: self.non_students,
            platform_stats,
            cosine_similarity,
            cohen_d,
            validation: self.validation,
        })
    }
}
