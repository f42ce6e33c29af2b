//! NBP Exchange Rates Client
//!
//! Outbound adapter implementing [`RateProvider`] on top of the public
//! National Bank of Poland API (`https://api.nbp.pl`). Only table A
//! (average mid-rates) is used.
//!
//! # Example
//! ```no_run
//! use chrono::NaiveDate;
//! use kantor_types::{CurrencyCode, RateProvider};
//! use nbp_rates::NbpClient;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = NbpClient::new(nbp_rates::DEFAULT_BASE_URL)?;
//! let date = NaiveDate::from_ymd_opt(2025, 9, 19).unwrap();
//! let rate = client.get_rate(CurrencyCode::EUR, date).await?;
//! println!("{} {} on {}", rate.code(), rate.mid(), rate.effective_date());
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode, header::ACCEPT};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::{debug, warn};

use kantor_types::{CurrencyCode, Rate, RateError, RateProvider, RateTable, TableRate};

/// Public NBP API root.
pub const DEFAULT_BASE_URL: &str = "https://api.nbp.pl/api";

/// Timeout applied to every upstream request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

// ─────────────────────────────────────────────────────────────────────────────
// Wire Payloads
// ─────────────────────────────────────────────────────────────────────────────

/// `/exchangerates/rates/A/{code}/...` response.
#[derive(Debug, Deserialize)]
struct SeriesPayload {
    code: String,
    #[serde(default)]
    rates: Vec<SeriesItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeriesItem {
    effective_date: NaiveDate,
    mid: f64,
}

/// One element of the `/exchangerates/tables/A/...` response array.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TablePayload {
    #[serde(default = "default_table")]
    table: String,
    #[serde(default)]
    no: String,
    effective_date: NaiveDate,
    #[serde(default)]
    rates: Vec<TableItem>,
}

fn default_table() -> String {
    "A".to_string()
}

#[derive(Debug, Deserialize)]
struct TableItem {
    currency: String,
    code: String,
    mid: f64,
}

impl SeriesPayload {
    fn into_rates(self, code: CurrencyCode) -> Result<Vec<Rate>, RateError> {
        if !self.code.eq_ignore_ascii_case(code.code()) {
            return Err(RateError::Malformed(format!(
                "expected rates for {}, got {}",
                code, self.code
            )));
        }
        self.rates
            .into_iter()
            .map(|item| {
                Rate::new(code, item.mid, item.effective_date)
                    .map_err(|e| RateError::Malformed(e.to_string()))
            })
            .collect()
    }
}

impl From<TablePayload> for RateTable {
    fn from(payload: TablePayload) -> Self {
        RateTable {
            table: payload.table,
            no: payload.no,
            effective_date: payload.effective_date,
            rates: payload
                .rates
                .into_iter()
                .map(|item| TableRate {
                    code: item.code,
                    currency: item.currency,
                    mid: item.mid,
                })
                .collect(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Client
// ─────────────────────────────────────────────────────────────────────────────

/// NBP API client.
#[derive(Debug, Clone)]
pub struct NbpClient {
    base_url: String,
    http: Client,
}

impl NbpClient {
    /// Creates a client with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self, RateError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Creates a client whose requests give up after `timeout`.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, RateError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("kantor/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RateError::Upstream(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        not_found: impl FnOnce() -> String,
    ) -> Result<T, RateError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Requesting NBP data from {}", url);

        let resp = self
            .http
            .get(&url)
            .query(&[("format", "json")])
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| RateError::Upstream(e.to_string()))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(RateError::NotFound(not_found()));
        }
        if !status.is_success() {
            warn!("NBP responded with {} for {}", status, url);
            return Err(RateError::Upstream(format!("NBP responded with {}", status)));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| RateError::Upstream(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| RateError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl RateProvider for NbpClient {
    async fn get_rate(&self, code: CurrencyCode, date: NaiveDate) -> Result<Rate, RateError> {
        let path = format!("/exchangerates/rates/A/{}/{}/", code, date);
        let payload: SeriesPayload = self
            .fetch(&path, || format!("Currency {} not found for {}", code, date))
            .await?;

        payload
            .into_rates(code)?
            .into_iter()
            .next()
            .ok_or_else(|| RateError::Malformed(format!("no rate for {} in payload", code)))
    }

    async fn get_history(
        &self,
        code: CurrencyCode,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Rate>, RateError> {
        let path = format!("/exchangerates/rates/A/{}/{}/{}/", code, start, end);
        let payload: SeriesPayload = self
            .fetch(&path, || {
                format!("Currency {} not found in range {}..{}", code, start, end)
            })
            .await?;

        payload.into_rates(code)
    }

    async fn get_table(&self, date: NaiveDate) -> Result<RateTable, RateError> {
        let path = format!("/exchangerates/tables/A/{}/", date);
        let payload: Vec<TablePayload> = self
            .fetch(&path, || format!("Table A not found for date {}", date))
            .await?;

        payload
            .into_iter()
            .next()
            .map(RateTable::from)
            .ok_or_else(|| RateError::Malformed("empty table A payload".into()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
