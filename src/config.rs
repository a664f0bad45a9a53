//! Configuration management for the transactions tooling

use std::env;
use std::path::PathBuf;

use chrono::NaiveDate;
use config::{Config, ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

/// Where transaction data lives and how synthetic datasets are shaped
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DatasetConfig {
    pub data_dir: PathBuf,
    pub size: usize,
    pub seed: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct FinesConfig {
    /// Amount charged per day late
    pub daily_rate: Decimal,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub fines: FinesConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // LIBTX_DATASET__SIZE=5000, LIBTX_LOGGING__LEVEL=debug, ...
            .add_source(
                Environment::with_prefix("LIBTX")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("dataset.data_dir", env::var("LIBTX_DATA_DIR").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            size: 1200,
            seed: 42,
            start_date: NaiveDate::from_ymd_opt(2024, 10, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2025, 10, 31).unwrap_or_default(),
        }
    }
}

impl Default for FinesConfig {
    fn default() -> Self {
        Self {
            daily_rate: Decimal::from(50),
        }
    }
}
