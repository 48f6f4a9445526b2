//! Record validation for the cohort pipeline
//!
//! Every field is parsed on its own and the results are composed into one
//! [`Validation`]. A record that fails is dropped by the caller; it is never
//! repaired.

use crate::table::{Column, UsageRecord};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

/// Unsigned integer or decimal, at most one dot
static ENGAGEMENT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[0-9]+\.?[0-9]*|\.[0-9]+)$").expect("valid pattern"));

/// Why a record was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
    /// `age` is empty, signed, or not made of decimal digits
    AgeNotDigits,
    /// `age` is digits but does not fit an integer
    AgeOutOfRange,
    /// `id` is empty or contains non-alphanumeric characters
    IdNotAlphanumeric,
    /// `engagement_score` is not an unsigned integer or decimal
    EngagementNotNumeric,
    /// A numeric field used by the aggregation does not parse
    NotNumeric(Column),
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::AgeNotDigits => write!(f, "age is not a digit string"),
            InvalidReason::AgeOutOfRange => write!(f, "age is out of range"),
            InvalidReason::IdNotAlphanumeric => write!(f, "id is not alphanumeric"),
            InvalidReason::EngagementNotNumeric => write!(f, "engagement_score is not numeric"),
            InvalidReason::NotNumeric(column) => write!(f, "{} is not numeric", column.header()),
        }
    }
}

/// A record whose fields all parsed
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRecord<'a> {
    pub age: u32,
    pub id: &'a str,
    pub engagement_score: f64,
    pub income: f64,
    pub time_spent_hour: f64,
    pub profession: &'a str,
    pub platform: &'a str,
}

impl ValidatedRecord<'_> {
    /// `time_spent_hour * engagement_score / 100`
    pub fn engagement_time(&self) -> f64 {
        self.time_spent_hour * self.engagement_score / 100.0
    }
}

/// Outcome of validating one record
#[derive(Debug, Clone, PartialEq)]
pub enum Validation<'a> {
    Valid(ValidatedRecord<'a>),
    Invalid(InvalidReason),
}

/// Parse `age`: ASCII digits only, no sign
pub fn parse_age(raw: &str) -> Result<u32, InvalidReason> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InvalidReason::AgeNotDigits);
    }
    raw.parse().map_err(|_| InvalidReason::AgeOutOfRange)
}

/// Check `id`: non-empty, letters and digits only
pub fn check_id(raw: &str) -> Result<&str, InvalidReason> {
    if !raw.is_empty() && raw.chars().all(char::is_alphanumeric) {
        Ok(raw)
    } else {
        Err(InvalidReason::IdNotAlphanumeric)
    }
}

/// Parse `engagement_score`: unsigned integer or decimal
pub fn parse_engagement_score(raw: &str) -> Result<f64, InvalidReason> {
    if !ENGAGEMENT_PATTERN.is_match(raw) {
        return Err(InvalidReason::EngagementNotNumeric);
    }
    raw.parse().map_err(|_| InvalidReason::EngagementNotNumeric)
}

/// Parse a numeric field that the aggregation needs but the structural
/// checks do not cover
pub fn parse_number(raw: &str, column: Column) -> Result<f64, InvalidReason> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or(InvalidReason::NotNumeric(column))
}

fn parse_record<'a>(record: &UsageRecord<'a>) -> Result<ValidatedRecord<'a>, InvalidReason> {
    Ok(ValidatedRecord {
        age: parse_age(record.age)?,
        id: check_id(record.id)?,
        engagement_score: parse_engagement_score(record.engagement_score)?,
        income: parse_number(record.income, Column::Income)?,
        time_spent_hour: parse_number(record.time_spent_hour, Column::TimeSpentHour)?,
        profession: record.profession,
        platform: record.platform,
    })
}

/// Validate a record, short-circuiting on the first failing field
pub fn validate<'a>(record: &UsageRecord<'a>) -> Validation<'a> {
    match parse_record(record) {
        Ok(valid) => Validation::Valid(valid),
        Err(reason) => Validation::Invalid(reason),
    }
}

/// Structural check only: age, id and engagement score
pub fn is_valid(record: &UsageRecord<'_>) -> bool {
    parse_age(record.age).is_ok()
        && check_id(record.id).is_ok()
        && parse_engagement_score(record.engagement_score).is_ok()
}
