//! Analysis configuration
//!
//! Loaded from an optional TOML file and then overridden by CLI flags.
//!
//! # Example engagestat.toml
//!
//! ```toml
//! delimiter = ","
//! cohort_profession = "student"
//! country = "United States"
//! min_time_spent_hour = 7.0
//!
//! [age_band]
//! min = 18
//! max = 25
//! ```

use crate::error::ConfigError;
use crate::table::DEFAULT_DELIMITER;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Inclusive `[min, max]` age range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeBand {
    pub min: u32,
    pub max: u32,
}

impl AgeBand {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, age: u32) -> bool {
        (self.min..=self.max).contains(&age)
    }
}

impl Default for AgeBand {
    fn default() -> Self {
        Self { min: 18, max: 25 }
    }
}

/// Parameters for both pipelines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Field delimiter of the input file
    pub delimiter: char,

    /// Profession that forms the first cohort; everyone else forms the second
    pub cohort_profession: String,

    /// Country whose in-debt heavy users are listed (matched case-insensitively)
    pub country: String,

    /// Users must spend strictly more hours than this to be listed
    pub min_time_spent_hour: f64,

    /// Inclusive age band for the country and age statistics
    pub age_band: AgeBand,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            cohort_profession: "student".to_string(),
            country: String::new(),
            min_time_spent_hour: 7.0,
            age_band: AgeBand::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// Load configuration from a TOML string; absent keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.age_band.min > self.age_band.max {
            return Err(ConfigError::InvertedAgeBand {
                min: self.age_band.min,
                max: self.age_band.max,
            });
        }

        if !self.min_time_spent_hour.is_finite() {
            return Err(ConfigError::NonFiniteThreshold(self.min_time_spent_hour));
        }

        if self.cohort_profession.trim().is_empty() {
            return Err(ConfigError::EmptyCohortProfession);
        }

        Ok(())
    }
}
