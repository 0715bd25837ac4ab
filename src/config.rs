//! Runtime configuration read from the environment

use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub catalog_base_url: String,
    pub request_timeout: Duration,
    pub checkout_delay: Duration,
    pub checkout_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_base_url: DEFAULT_CATALOG_URL.to_string(),
            request_timeout: Duration::from_millis(10_000),
            checkout_delay: Duration::from_millis(2_000),
            checkout_timeout: Duration::from_millis(30_000),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: String, value: String },
}

impl Config {
    /// Reads `CATALOG_BASE_URL`, `CATALOG_TIMEOUT_MS`, `CHECKOUT_DELAY_MS` and
    /// `CHECKOUT_TIMEOUT_MS`, keeping defaults for unset keys.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let millis = |key: &str, default: Duration| -> Result<Duration, ConfigError> {
            match lookup(key) {
                None => Ok(default),
                Some(value) => value
                    .trim()
                    .parse::<u64>()
                    .map(Duration::from_millis)
                    .map_err(|_| ConfigError::Invalid { key: key.to_string(), value }),
            }
        };
        Ok(Self {
            catalog_base_url: lookup("CATALOG_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty())
                .unwrap_or(defaults.catalog_base_url),
            request_timeout: millis("CATALOG_TIMEOUT_MS", defaults.request_timeout)?,
            checkout_delay: millis("CHECKOUT_DELAY_MS", defaults.checkout_delay)?,
            checkout_timeout: millis("CHECKOUT_TIMEOUT_MS", defaults.checkout_timeout)?,
        })
    }
}
