//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use utoipa::OpenApi;

use kantor_types::{
    AppError, CalculateRequest, CurrencyCode, HealthResponse, HealthServices, HistoryRequest,
    HistoryStore, RateProvider, ServiceStatus, TradeSide,
};

use crate::openapi::ApiDoc;
use crate::{CalculatorService, CantorService};

/// Application state shared across handlers.
pub struct AppState<P: RateProvider, S: HistoryStore> {
    pub cantor: CantorService<P>,
    pub calculator: CalculatorService<S>,
    /// Deployment name reported by the health check
    pub environment: String,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Query parameters
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuoteQuery {
    pub side: Option<String>,
    pub date: Option<String>,
}

/// Parses an optional `YYYY-MM-DD` value; absent means today (UTC).
fn parse_date(raw: Option<&str>) -> Result<NaiveDate, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(Utc::now().date_naive()),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| AppError::BadRequest("Invalid date format. Use YYYY-MM-DD.".into())),
    }
}

fn parse_code(raw: &str) -> Result<CurrencyCode, AppError> {
    raw.parse::<CurrencyCode>().map_err(AppError::from)
}

fn parse_side(raw: Option<&str>) -> Result<TradeSide, AppError> {
    raw.ok_or_else(|| AppError::BadRequest("side parameter is required".into()))?
        .parse::<TradeSide>()
        .map_err(AppError::from)
}

// ─────────────────────────────────────────────────────────────────────────────
// Health
// ─────────────────────────────────────────────────────────────────────────────

/// Health check endpoint. Answers 503 when the history store is unreadable.
pub async fn health<P: RateProvider, S: HistoryStore>(
    State(state): State<Arc<AppState<P, S>>>,
) -> impl IntoResponse {
    let store = if state.calculator.store_healthy().await {
        ServiceStatus::Healthy
    } else {
        ServiceStatus::Unhealthy
    };

    let body = HealthResponse {
        status: store,
        timestamp: Utc::now().to_rfc3339(),
        environment: state.environment.clone(),
        services: HealthServices {
            history_store: store,
        },
    };

    let status = match store {
        ServiceStatus::Healthy => StatusCode::OK,
        ServiceStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status, Json(body))
}

// ─────────────────────────────────────────────────────────────────────────────
// Rates and quotes
// ─────────────────────────────────────────────────────────────────────────────

/// Get the mid-rate of a currency.
#[tracing::instrument(skip(state))]
pub async fn get_rate<P: RateProvider, S: HistoryStore>(
    State(state): State<Arc<AppState<P, S>>>,
    Path(code): Path<String>,
    Query(query): Query<DateQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let code = parse_code(&code)?;
    let date = parse_date(query.date.as_deref())?;

    let rate = state.cantor.rate(code, date).await?;
    Ok(Json(rate))
}

/// Get fourteen days of mid-rates for a currency.
#[tracing::instrument(skip(state))]
pub async fn get_rate_history<P: RateProvider, S: HistoryStore>(
    State(state): State<Arc<AppState<P, S>>>,
    Path(code): Path<String>,
    Query(query): Query<DateQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let code = parse_code(&code)?;
    let end = parse_date(query.date.as_deref())?;

    let history = state.cantor.history(code, end).await?;
    Ok(Json(history))
}

/// Get a desk quote.
#[tracing::instrument(skip(state))]
pub async fn get_quote<P: RateProvider, S: HistoryStore>(
    State(state): State<Arc<AppState<P, S>>>,
    Path(code): Path<String>,
    Query(query): Query<QuoteQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let code = parse_code(&code)?;
    let side = parse_side(query.side.as_deref())?;
    let date = parse_date(query.date.as_deref())?;

    let quote = state.cantor.quote(code, side, date).await?;
    tracing::debug!(price = quote.price, "Quoted {} {}", side, code);
    Ok(Json(quote))
}

/// Get the whole table A.
#[tracing::instrument(skip(state))]
pub async fn get_table<P: RateProvider, S: HistoryStore>(
    State(state): State<Arc<AppState<P, S>>>,
    Query(query): Query<DateQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let date = parse_date(query.date.as_deref())?;

    let table = state.cantor.table(date).await?;
    Ok(Json(table))
}

// ─────────────────────────────────────────────────────────────────────────────
// Calculator
// ─────────────────────────────────────────────────────────────────────────────

/// Run one calculation.
#[tracing::instrument(skip_all, fields(operation = tracing::field::Empty))]
pub async fn calculate<P: RateProvider, S: HistoryStore>(
    State(state): State<Arc<AppState<P, S>>>,
    payload: Result<Json<CalculateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload.map_err(|e| {
        tracing::debug!("Rejected calculate body: {}", e);
        AppError::BadRequest("Invalid input".into())
    })?;
    if let Some(operation) = req.operation.as_deref() {
        tracing::Span::current().record("operation", operation);
    }

    let resp = state.calculator.calculate(req)?;
    Ok(Json(resp))
}

/// Get the calculator history.
#[tracing::instrument(skip(state))]
pub async fn get_history<P: RateProvider, S: HistoryStore>(
    State(state): State<Arc<AppState<P, S>>>,
) -> Result<impl IntoResponse, ApiError> {
    let history = state.calculator.history().await?;
    Ok(Json(history))
}

/// Add to or clear the calculator history.
#[tracing::instrument(skip_all)]
pub async fn update_history<P: RateProvider, S: HistoryStore>(
    State(state): State<Arc<AppState<P, S>>>,
    payload: Result<Json<HistoryRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload.map_err(|e| {
        tracing::debug!("Rejected history body: {}", e);
        AppError::BadRequest("Invalid request".into())
    })?;

    let history = state.calculator.apply(req).await?;
    Ok(Json(history))
}

/// Serve the OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
