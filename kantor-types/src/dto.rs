//! Data Transfer Objects (DTOs) for requests and responses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{CalcResult, CurrencyCode, HistoryEntry, Rate};

// ─────────────────────────────────────────────────────────────────────────────
// Rates DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// One day of a rate history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RatePoint {
    #[schema(value_type = String, example = "2025-09-19")]
    pub effective_date: NaiveDate,
    #[schema(example = 4.25)]
    pub mid: f64,
}

impl From<&Rate> for RatePoint {
    fn from(rate: &Rate) -> Self {
        Self {
            effective_date: rate.effective_date(),
            mid: rate.mid(),
        }
    }
}

/// Mid-rates of one currency over a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RateHistoryResponse {
    pub code: CurrencyCode,
    /// First day of the requested range
    #[schema(value_type = String, example = "2025-09-05")]
    pub start: NaiveDate,
    /// Last day of the requested range
    #[schema(value_type = String, example = "2025-09-19")]
    pub end: NaiveDate,
    /// Publication days in the range, oldest first
    pub items: Vec<RatePoint>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Health DTOs
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthServices {
    pub history_store: ServiceStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: ServiceStatus,
    /// RFC 3339 time the check ran
    #[schema(example = "2025-09-19T12:00:00+00:00")]
    pub timestamp: String,
    #[schema(example = "dev")]
    pub environment: String,
    pub services: HealthServices,
}

// ─────────────────────────────────────────────────────────────────────────────
// Calculator DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to run one calculation. All three fields are required; they are
/// optional here so that a missing field is reported as invalid input.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CalculateRequest {
    #[schema(example = 10)]
    pub num1: Option<f64>,
    #[schema(example = 4)]
    pub num2: Option<f64>,
    /// One of `+`, `-`, `*`, `/`
    #[schema(example = "/")]
    pub operation: Option<String>,
}

impl CalculateRequest {
    pub fn new(num1: f64, num2: f64, operation: impl Into<String>) -> Self {
        Self {
            num1: Some(num1),
            num2: Some(num2),
            operation: Some(operation.into()),
        }
    }
}

/// Result of a calculation, echoing its inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CalculateResponse {
    #[schema(example = 2.5)]
    pub result: CalcResult,
    pub num1: f64,
    pub num2: f64,
    pub operation: String,
}

/// Mutation applied to the calculator history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HistoryAction {
    Add,
    Clear,
}

/// Request to change the calculator history.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HistoryRequest {
    pub action: HistoryAction,
    /// Entry to record; required when `action` is `add`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<HistoryEntry>,
}

impl HistoryRequest {
    pub fn add(entry: HistoryEntry) -> Self {
        Self {
            action: HistoryAction::Add,
            entry: Some(entry),
        }
    }

    pub fn clear() -> Self {
        Self {
            action: HistoryAction::Clear,
            entry: None,
        }
    }
}
