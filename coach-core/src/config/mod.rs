use std::time::Duration;

use crate::error::AppError;
use crate::retry::RetryConfig;
use config::{Config as Cfg, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_advance_max_retries")]
    pub advance_max_retries: u32,
    #[serde(default = "default_advance_backoff_ms")]
    pub advance_backoff_ms: u64,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_advance_max_retries() -> u32 {
    3
}

fn default_advance_backoff_ms() -> u64 {
    100
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Retry policy for compare-and-swap writes against the store.
    pub fn advance_retry(&self) -> RetryConfig {
        RetryConfig {
            max_retries: self.advance_max_retries,
            initial_backoff: Duration::from_millis(self.advance_backoff_ms),
            ..RetryConfig::default()
        }
    }
}
