//! # Kantor Client SDK
//!
//! A typed Rust client for the Kantor API.

use chrono::NaiveDate;
use kantor_types::{
    CalculateRequest, CalculateResponse, CurrencyCode, HealthResponse, History, HistoryEntry,
    HistoryRequest, Quote, Rate, RateHistoryResponse, RateTable, TradeSide,
};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Kantor API client.
pub struct KantorClient {
    base_url: String,
    forwarded_for: Option<String>,
    http: Client,
}

impl KantorClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            forwarded_for: None,
            http: Client::new(),
        }
    }

    /// Sends `X-Forwarded-For` with every request, so the server's rate
    /// limiter attributes calls to `client`.
    pub fn with_forwarded_for(mut self, client: impl Into<String>) -> Self {
        self.forwarded_for = Some(client.into());
        self
    }

    /// Gets the health report. A 503 still carries a report and is not an error.
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let resp = self.request(self.http.get(self.url("/api/health"))).send().await?;
        if resp.status() == StatusCode::SERVICE_UNAVAILABLE {
            let body = resp.text().await?;
            return Ok(serde_json::from_str(&body)?);
        }
        self.handle_response(resp).await
    }

    /// Gets the mid-rate of `code`, for today when `date` is `None`.
    pub async fn rate(
        &self,
        code: CurrencyCode,
        date: Option<NaiveDate>,
    ) -> Result<Rate, ClientError> {
        self.get(&format!("/api/rates/{}", code), &date_query(date))
            .await
    }

    /// Gets fourteen days of mid-rates ending on `date`.
    pub async fn rate_history(
        &self,
        code: CurrencyCode,
        date: Option<NaiveDate>,
    ) -> Result<RateHistoryResponse, ClientError> {
        self.get(&format!("/api/rates/{}/history", code), &date_query(date))
            .await
    }

    /// Gets a desk quote.
    pub async fn quote(
        &self,
        code: CurrencyCode,
        side: TradeSide,
        date: Option<NaiveDate>,
    ) -> Result<Quote, ClientError> {
        let mut query = date_query(date);
        query.push(("side", side.as_str().to_string()));
        self.get(&format!("/api/cantor/quote/{}", code), &query)
            .await
    }

    /// Gets the whole table A.
    pub async fn table(&self, date: Option<NaiveDate>) -> Result<RateTable, ClientError> {
        self.get("/api/tables/a", &date_query(date)).await
    }

    /// Runs one calculation.
    pub async fn calculate(
        &self,
        num1: f64,
        num2: f64,
        operation: &str,
    ) -> Result<CalculateResponse, ClientError> {
        let req = CalculateRequest::new(num1, num2, operation);
        self.post("/calculate.php", &req).await
    }

    /// Gets the calculator history, newest first.
    pub async fn history(&self) -> Result<History, ClientError> {
        self.get("/history.php", &[]).await
    }

    /// Records an entry in the calculator history.
    pub async fn add_history(&self, entry: HistoryEntry) -> Result<History, ClientError> {
        self.post("/history.php", &HistoryRequest::add(entry)).await
    }

    /// Empties the calculator history.
    pub async fn clear_history(&self) -> Result<History, ClientError> {
        self.post("/history.php", &HistoryRequest::clear()).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.forwarded_for {
            Some(client) => req.header("X-Forwarded-For", client),
            None => req,
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let req = self.request(self.http.get(self.url(path)).query(query));
        let resp = req.send().await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let req = self.request(self.http.post(self.url(path)).json(body));
        let resp = req.send().await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

fn date_query(date: Option<NaiveDate>) -> Vec<(&'static str, String)> {
    date.map(|d| vec![("date", d.format("%Y-%m-%d").to_string())])
        .unwrap_or_default()
}
