use crate::error::StatsError;
use crate::stats;
use crate::validate::ValidatedRecord;
use serde::Serialize;
use std::collections::BTreeMap;

/// `[age, time_spent_hour, engagement_score]` of one member
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MemberProfile {
    pub age: u32,
    pub time_spent_hour: f64,
    pub engagement_score: f64,
}

/// A named partition of validated records
///
/// The numeric vectors are appended in record order, so `ages[i]`,
/// `incomes[i]` and `engagement_times[i]` always describe the same record.
/// The member map is keyed by lower-cased id; a repeated id replaces the
/// earlier profile while its values stay in the vectors.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Cohort {
    label: String,
    members: BTreeMap<String, MemberProfile>,
    #[serde(skip)]
    ages: Vec<f64>,
    #[serde(skip)]
    incomes: Vec<f64>,
    #[serde(skip)]
    engagement_times: Vec<f64>,
}

impl Cohort {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn push(&mut self, record: &ValidatedRecord<'_>) {
        self.members.insert(
            record.id.to_lowercase(),
            MemberProfile {
                age: record.age,
                time_spent_hour: record.time_spent_hour,
                engagement_score: record.engagement_score,
            },
        );
        self.ages.push(f64::from(record.age));
        self.incomes.push(record.income);
        self.engagement_times.push(record.engagement_time());
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn members(&self) -> &BTreeMap<String, MemberProfile> {
        &self.members
    }

    pub fn ages(&self) -> &[f64] {
        &self.ages
    }

    pub fn incomes(&self) -> &[f64] {
        &self.incomes
    }

    pub fn engagement_times(&self) -> &[f64] {
        &self.engagement_times
    }

    /// Number of records routed here (repeated ids included)
    pub fn record_count(&self) -> usize {
        self.ages.len()
    }

    /// Cosine similarity of the age and income vectors, rounded
    pub fn age_income_similarity(&self) -> Result<f64, StatsError> {
        stats::cosine_similarity(&self.ages, &self.incomes).map(stats::round4)
    }
}
