//! Configuration loading from environment.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub nbp_api_url: String,
    pub nbp_timeout: Duration,
    /// JSON file path, or `:memory:`
    pub history_file: String,
    pub rate_limit_per_minute: u32,
    pub environment: String,
    pub otel_enabled: bool,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let nbp_timeout_secs: u64 = parse(&lookup, "NBP_TIMEOUT_SECS", 5)?;

        Ok(Self {
            port: parse(&lookup, "PORT", 8000)?,
            nbp_api_url: var("NBP_API_URL", nbp_rates::DEFAULT_BASE_URL),
            nbp_timeout: Duration::from_secs(nbp_timeout_secs),
            history_file: var("HISTORY_FILE", "history.json"),
            rate_limit_per_minute: parse(&lookup, "RATE_LIMIT_PER_MINUTE", 100)?,
            environment: var("APP_ENV", "dev"),
            otel_enabled: parse(&lookup, "OTEL_ENABLED", false)?,
        })
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        None => Ok(default),
    }
}
