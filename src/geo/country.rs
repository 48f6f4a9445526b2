use super::{in_band, parse_float};
use crate::config::AgeBand;
use crate::table::{Column, Table};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// `[id, income]` of an in-debt heavy user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Debtor {
    pub id: String,
    pub income: f64,
}

/// Ids that read as integers sort numerically ahead of all other ids,
/// which sort as text
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum IdKey<'a> {
    Numeric(Integer<'a>),
    Text(&'a str),
}

impl<'a> IdKey<'a> {
    fn of(id: &'a str) -> Self {
        match Integer::parse(id) {
            Some(number) => IdKey::Numeric(number),
            None => IdKey::Text(id),
        }
    }
}

/// Integer of any width, kept as its significant digits
#[derive(Debug, PartialEq, Eq)]
struct Integer<'a> {
    negative: bool,
    /// Decimal digits without leading zeros; empty for zero
    digits: &'a str,
}

impl<'a> Integer<'a> {
    /// Optional sign and ASCII digits, surrounding blanks allowed
    fn parse(raw: &'a str) -> Option<Self> {
        let raw = raw.trim();
        let (negative, unsigned) = match raw.as_bytes().first() {
            Some(b'-') => (true, &raw[1..]),
            Some(b'+') => (false, &raw[1..]),
            _ => (false, raw),
        };
        if unsigned.is_empty() || !unsigned.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let digits = unsigned.trim_start_matches('0');
        Some(Self {
            negative: negative && !digits.is_empty(),
            digits,
        })
    }

    fn magnitude(&self) -> (usize, &'a str) {
        (self.digits.len(), self.digits)
    }
}

impl Ord for Integer<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self.magnitude().cmp(&other.magnitude()),
            (true, true) => other.magnitude().cmp(&self.magnitude()),
        }
    }
}

impl PartialOrd for Integer<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Users of `country` (case-insensitive) who are in debt and spend more than
/// `min_hours`, sorted ascending by integer id
pub fn sort_users_by_country(table: &Table, country: &str, min_hours: f64) -> Vec<Debtor> {
    let country = country.to_lowercase();

    let mut debtors: Vec<Debtor> = table
        .records()
        .filter(|record| {
            record.country.to_lowercase() == country && record.indebt.eq_ignore_ascii_case("true")
        })
        .filter(|record| {
            parse_float(record.time_spent_hour, Column::TimeSpentHour)
                .is_some_and(|hours| hours > min_hours)
        })
        .filter_map(|record| {
            let income = parse_float(record.income, Column::Income)?;
            Some(Debtor {
                id: record.id.to_string(),
                income,
            })
        })
        .collect();

    debtors.sort_by(|a, b| IdKey::of(&a.id).cmp(&IdKey::of(&b.id)));
    debtors
}

/// Distinct trimmed, lower-cased countries of users inside `band`, sorted
pub fn unique_countries(table: &Table, band: AgeBand) -> Vec<String> {
    table
        .records()
        .filter(|record| in_band(record.age, band))
        .map(|record| record.country.trim().to_lowercase())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
