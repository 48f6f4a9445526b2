//! CLI argument parsing for engagestat

use crate::config::AnalysisConfig;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for analysis results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

/// Which pipelines to run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Selection {
    /// Cohort, platform and effect-size analysis
    Cohort,
    /// Country and age-band analysis
    Geo,
    /// Both pipelines over one load of the file
    #[default]
    All,
}

impl Selection {
    pub fn includes_cohort(self) -> bool {
        matches!(self, Selection::Cohort | Selection::All)
    }

    pub fn includes_geo(self) -> bool {
        matches!(self, Selection::Geo | Selection::All)
    }
}

#[derive(Parser, Debug)]
#[command(name = "engagestat")]
#[command(version)]
#[command(about = "Cohort, platform and age-band statistics for platform usage datasets", long_about = None)]
pub struct Cli {
    /// Delimited dataset to analyze (header row first)
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Pipelines to run
    #[arg(long = "pipeline", value_enum, default_value = "all")]
    pub pipeline: Selection,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// TOML configuration file; flags below override its values
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Country whose in-debt heavy users are listed
    #[arg(long = "country", value_name = "NAME")]
    pub country: Option<String>,

    /// Lower bound of the age band (inclusive)
    #[arg(long = "min-age", value_name = "AGE")]
    pub min_age: Option<u32>,

    /// Upper bound of the age band (inclusive)
    #[arg(long = "max-age", value_name = "AGE")]
    pub max_age: Option<u32>,

    /// Listed users must spend strictly more hours than this (default: 7)
    #[arg(long = "min-time-spent", value_name = "HOURS")]
    pub min_time_spent: Option<f64>,

    /// Field delimiter of the input file (default: ',')
    #[arg(short = 'd', long = "delimiter", value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// Profession forming the first cohort (default: student)
    #[arg(long = "cohort", value_name = "PROFESSION")]
    pub cohort: Option<String>,

    /// Enable debug tracing output on stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// Configuration file (or defaults) with command-line overrides applied
    pub fn analysis_config(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::from_file(path)?,
            None => AnalysisConfig::default(),
        };

        if let Some(country) = &self.country {
            config.country = country.clone();
        }
        if let Some(min_age) = self.min_age {
            config.age_band.min = min_age;
        }
        if let Some(max_age) = self.max_age {
            config.age_band.max = max_age;
        }
        if let Some(hours) = self.min_time_spent {
            config.min_time_spent_hour = hours;
        }
        if let Some(delimiter) = self.delimiter {
            config.delimiter = delimiter;
        }
        if let Some(cohort) = &self.cohort {
            config.cohort_profession = cohort.clone();
        }

        config
            .validate()
            .context("Invalid command-line options")?;
        Ok(config)
    }
}
