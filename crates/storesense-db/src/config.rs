//! Runtime configuration.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::pool::DbConfig;
use storesense_core::{ForecastPolicy, DEFAULT_LEAD_TIME_DAYS, DEFAULT_LOW_STOCK_THRESHOLD};

/// StoreSense configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSenseConfig {
    /// SQLite database file (`STORESENSE_DB_PATH`)
    pub database_path: PathBuf,

    /// Pool size (`STORESENSE_MAX_CONNECTIONS`)
    pub max_connections: u32,

    /// Seconds a writer waits on another's lock (`STORESENSE_BUSY_TIMEOUT_SECS`)
    pub busy_timeout_secs: u64,

    /// Default low-stock threshold (`STORESENSE_LOW_STOCK_THRESHOLD`)
    pub low_stock_threshold: i64,

    /// Days of demand a reorder covers (`STORESENSE_LEAD_TIME_DAYS`)
    pub lead_time_days: u32,
}

impl Default for StoreSenseConfig {
    fn default() -> Self {
        StoreSenseConfig {
            database_path: PathBuf::from("./storesense.db"),
            max_connections: 5,
            busy_timeout_secs: 30,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            lead_time_days: DEFAULT_LEAD_TIME_DAYS,
        }
    }
}

impl StoreSenseConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = StoreSenseConfig::default();

        let config = StoreSenseConfig {
            database_path: lookup("STORESENSE_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),

            max_connections: parse_or(&lookup, "STORESENSE_MAX_CONNECTIONS", defaults.max_connections)?,

            busy_timeout_secs: parse_or(
                &lookup,
                "STORESENSE_BUSY_TIMEOUT_SECS",
                defaults.busy_timeout_secs,
            )?,

            low_stock_threshold: parse_or(
                &lookup,
                "STORESENSE_LOW_STOCK_THRESHOLD",
                defaults.low_stock_threshold,
            )?,

            lead_time_days: parse_or(&lookup, "STORESENSE_LEAD_TIME_DAYS", defaults.lead_time_days)?,
        };

        if config.max_connections == 0 {
            return Err(ConfigError::InvalidValue("STORESENSE_MAX_CONNECTIONS".to_string()));
        }
        if config.low_stock_threshold < 0 {
            return Err(ConfigError::InvalidValue(
                "STORESENSE_LOW_STOCK_THRESHOLD".to_string(),
            ));
        }

        Ok(config)
    }

    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path)
            .max_connections(self.max_connections)
            .busy_timeout(Duration::from_secs(self.busy_timeout_secs))
    }

    pub fn forecast_policy(&self) -> ForecastPolicy {
        ForecastPolicy::default()
            .with_low_stock_threshold(self.low_stock_threshold)
            .with_lead_time_days(self.lead_time_days)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}
