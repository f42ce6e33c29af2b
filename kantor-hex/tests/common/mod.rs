//! Shared fixtures for the HTTP integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request},
};
use chrono::NaiveDate;
use http_body_util::BodyExt;

use kantor_hex::{CalculatorService, CantorService, inbound::HttpServer};
use kantor_repo::InMemoryStore;
use kantor_types::{CurrencyCode, Rate, RateError, RateProvider, RateTable, TableRate};

/// Publishes a fixed mid for EUR, USD and CZK on every day; nothing else.
pub struct StubRates;

impl StubRates {
    fn mid(code: CurrencyCode, date: NaiveDate) -> Result<f64, RateError> {
        match code {
            CurrencyCode::EUR => Ok(4.25),
            CurrencyCode::USD => Ok(4.0),
            CurrencyCode::CZK => Ok(0.18),
            other => Err(RateError::NotFound(format!(
                "Currency {} not found for {}",
                other, date
            ))),
        }
    }

    fn rate(code: CurrencyCode, date: NaiveDate) -> Result<Rate, RateError> {
        let mid = Self::mid(code, date)?;
        Rate::new(code, mid, date).map_err(|e| RateError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl RateProvider for StubRates {
    async fn get_rate(&self, code: CurrencyCode, date: NaiveDate) -> Result<Rate, RateError> {
        Self::rate(code, date)
    }

    async fn get_history(
        &self,
        code: CurrencyCode,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Rate>, RateError> {
        start
            .iter_days()
            .take_while(|d| *d <= end)
            .map(|d| Self::rate(code, d))
            .collect()
    }

    async fn get_table(&self, date: NaiveDate) -> Result<RateTable, RateError> {
        Ok(RateTable {
            table: "A".into(),
            no: "182/A/NBP/2025".into(),
            effective_date: date,
            rates: vec![TableRate {
                code: "EUR".into(),
                currency: "euro".into(),
                mid: 4.25,
            }],
        })
    }
}

pub fn server() -> HttpServer<StubRates, InMemoryStore> {
    HttpServer::new(
        CantorService::new(StubRates),
        CalculatorService::new(InMemoryStore::new()),
        "test",
    )
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
