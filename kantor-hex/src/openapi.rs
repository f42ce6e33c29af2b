//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use kantor_types::domain::{
    CalcResult, CurrencyCode, History, HistoryEntry, Quote, Rate, RateTable, TableRate, TradeSide,
};
use kantor_types::dto::{
    CalculateRequest, CalculateResponse, HealthResponse, HealthServices, HistoryAction,
    HistoryRequest, RateHistoryResponse, RatePoint, ServiceStatus,
};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "History store unavailable", body = HealthResponse)
    )
)]
async fn health() {}

/// NBP mid-rate for a currency
#[utoipa::path(
    get,
    path = "/api/rates/{code}",
    tag = "rates",
    params(
        ("code" = String, Path, description = "Currency code (EUR, USD, CZK, IDR, BRL)"),
        ("date" = Option<String>, Query, description = "YYYY-MM-DD, defaults to today")
    ),
    responses(
        (status = 200, description = "Mid-rate", body = Rate),
        (status = 400, description = "Invalid date"),
        (status = 404, description = "Unsupported currency or no rate for the date")
    )
)]
async fn get_rate() {}

/// Fourteen days of mid-rates ending on a date
#[utoipa::path(
    get,
    path = "/api/rates/{code}/history",
    tag = "rates",
    params(
        ("code" = String, Path, description = "Currency code"),
        ("date" = Option<String>, Query, description = "Last day of the window, defaults to today")
    ),
    responses(
        (status = 200, description = "Rate history", body = RateHistoryResponse),
        (status = 400, description = "Invalid date"),
        (status = 404, description = "Unsupported currency or no rates in range")
    )
)]
async fn get_rate_history() {}

/// Desk buy or sell price for a currency
#[utoipa::path(
    get,
    path = "/api/cantor/quote/{code}",
    tag = "cantor",
    params(
        ("code" = String, Path, description = "Currency code"),
        ("side" = String, Query, description = "buy or sell"),
        ("date" = Option<String>, Query, description = "YYYY-MM-DD, defaults to today")
    ),
    responses(
        (status = 200, description = "Quote", body = Quote),
        (status = 400, description = "Missing or invalid side, unsupported side, invalid date"),
        (status = 404, description = "Unsupported currency or no rate for the date")
    )
)]
async fn get_quote() {}

/// Whole NBP table A
#[utoipa::path(
    get,
    path = "/api/tables/a",
    tag = "rates",
    params(
        ("date" = Option<String>, Query, description = "YYYY-MM-DD, defaults to today")
    ),
    responses(
        (status = 200, description = "Rate table", body = RateTable),
        (status = 404, description = "No table for the date")
    )
)]
async fn get_table() {}

/// Run one calculation
#[utoipa::path(
    post,
    path = "/calculate.php",
    tag = "calculator",
    request_body = CalculateRequest,
    responses(
        (status = 200, description = "Result, or a division by zero message", body = CalculateResponse),
        (status = 400, description = "Invalid input or operation")
    )
)]
async fn calculate() {}

/// Calculator history, newest first
#[utoipa::path(
    get,
    path = "/history.php",
    tag = "calculator",
    responses(
        (status = 200, description = "History", body = History)
    )
)]
async fn get_history() {}

/// Add to or clear the calculator history
#[utoipa::path(
    post,
    path = "/history.php",
    tag = "calculator",
    request_body = HistoryRequest,
    responses(
        (status = 200, description = "Updated history", body = History),
        (status = 400, description = "Invalid request")
    )
)]
async fn update_history() {}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Kantor API",
        version = "1.0.0",
        description = "Currency desk backed by National Bank of Poland table A mid-rates, plus a four-function calculator with a shared history.\n\nAll `/api` routes except `/api/health` are rate limited per client."
    ),
    paths(
        health,
        get_rate,
        get_rate_history,
        get_quote,
        get_table,
        calculate,
        get_history,
        update_history,
    ),
    components(
        schemas(
            CurrencyCode,
            TradeSide,
            Rate,
            RatePoint,
            RateHistoryResponse,
            Quote,
            RateTable,
            TableRate,
            CalcResult,
            CalculateRequest,
            CalculateResponse,
            HistoryEntry,
            History,
            HistoryAction,
            HistoryRequest,
            HealthResponse,
            HealthServices,
            ServiceStatus,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "rates", description = "NBP mid-rates"),
        (name = "cantor", description = "Desk quotes"),
        (name = "calculator", description = "Calculator and history"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_all_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/health",
            "/api/rates/{code}",
            "/api/rates/{code}/history",
            "/api/cantor/quote/{code}",
            "/api/tables/a",
            "/calculate.php",
            "/history.php",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
