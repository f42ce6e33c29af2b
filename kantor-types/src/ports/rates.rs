//! Exchange rate provider port.
//!
//! This trait defines the interface for mid-rate sources.
//! Implementations can be HTTP clients, mock providers, etc.

use chrono::NaiveDate;

use crate::domain::{CurrencyCode, Rate, RateTable};

/// Error type for rate lookups.
#[derive(Debug, thiserror::Error)]
pub enum RateError {
    /// The provider has no rate for the requested currency and date(s).
    #[error("{0}")]
    NotFound(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Malformed upstream payload: {0}")]
    Malformed(String),
}

/// Port trait for mid-rate providers.
#[async_trait::async_trait]
pub trait RateProvider: Send + Sync + 'static {
    /// Mid-rate of `code` published for `date`.
    async fn get_rate(&self, code: CurrencyCode, date: NaiveDate) -> Result<Rate, RateError>;

    /// Mid-rates of `code` for every publication day in `[start, end]`,
    /// oldest first.
    async fn get_history(
        &self,
        code: CurrencyCode,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Rate>, RateError>;

    /// The whole table A published for `date`.
    async fn get_table(&self, date: NaiveDate) -> Result<RateTable, RateError>;
}
