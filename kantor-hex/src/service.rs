//! Kantor Application Services
//!
//! Orchestrate domain operations through the rate provider and history
//! store ports. Contain NO infrastructure logic - pure business orchestration.

use chrono::{Duration, NaiveDate};
use tokio::sync::Mutex;

use kantor_types::{
    AppError, CalcResult, CalculateRequest, CalculateResponse, CurrencyCode, DomainError, History,
    HistoryAction, HistoryEntry, HistoryRequest, HistoryStore, Quote, Rate, RateHistoryResponse,
    RatePoint, RateProvider, RateTable, TradeSide, calculate,
};

/// Length of the window served by the rate history endpoint.
pub const HISTORY_WINDOW_DAYS: i64 = 14;

// ─────────────────────────────────────────────────────────────────────────────
// Currency Desk
// ─────────────────────────────────────────────────────────────────────────────

/// Application service for rates and desk quotes.
///
/// Generic over `P: RateProvider` - the upstream adapter is injected at
/// compile time, so tests can swap in a canned provider.
pub struct CantorService<P: RateProvider> {
    rates: P,
}

impl<P: RateProvider> CantorService<P> {
    /// Creates a new desk service with the given rate provider.
    pub fn new(rates: P) -> Self {
        Self { rates }
    }

    /// Returns a reference to the underlying provider.
    pub fn provider(&self) -> &P {
        &self.rates
    }

    /// Gets the mid-rate of `code` for `date`.
    pub async fn rate(&self, code: CurrencyCode, date: NaiveDate) -> Result<Rate, AppError> {
        self.rates.get_rate(code, date).await.map_err(Into::into)
    }

    /// Gets the mid-rates of `code` for the fourteen days ending on `end`.
    pub async fn history(
        &self,
        code: CurrencyCode,
        end: NaiveDate,
    ) -> Result<RateHistoryResponse, AppError> {
        let start = end
            .checked_sub_signed(Duration::days(HISTORY_WINDOW_DAYS))
            .ok_or_else(|| AppError::BadRequest("Invalid date format. Use YYYY-MM-DD.".into()))?;
        let rates = self.rates.get_history(code, start, end).await?;

        Ok(RateHistoryResponse {
            code,
            start,
            end,
            items: rates.iter().map(RatePoint::from).collect(),
        })
    }

    /// Prices `code` for `side` against the mid-rate of `date`.
    pub async fn quote(
        &self,
        code: CurrencyCode,
        side: TradeSide,
        date: NaiveDate,
    ) -> Result<Quote, AppError> {
        // Reject before spending an upstream request.
        if !code.supports(side) {
            return Err(DomainError::UnsupportedOperation { code, side }.into());
        }

        let rate = self.rates.get_rate(code, date).await?;
        Quote::from_rate(&rate, side).map_err(Into::into)
    }

    /// Gets the whole table A for `date`.
    pub async fn table(&self, date: NaiveDate) -> Result<RateTable, AppError> {
        self.rates.get_table(date).await.map_err(Into::into)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Calculator
// ─────────────────────────────────────────────────────────────────────────────

/// Application service for the calculator and its history.
///
/// Read-modify-write cycles on the store are serialized by an internal
/// lock; across processes the last writer wins.
pub struct CalculatorService<S: HistoryStore> {
    store: S,
    write_lock: Mutex<()>,
}

impl<S: HistoryStore> CalculatorService<S> {
    /// Creates a new calculator service over the given store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Runs one calculation.
    ///
    /// Division by zero is a valid outcome reported in `result`; an unknown
    /// operator is a bad request.
    pub fn calculate(&self, req: CalculateRequest) -> Result<CalculateResponse, AppError> {
        let (Some(num1), Some(num2), Some(operation)) = (req.num1, req.num2, req.operation) else {
            return Err(AppError::BadRequest("Invalid input".into()));
        };

        let result = match calculate(num1, num2, &operation) {
            Ok(value) => CalcResult::Value(value),
            Err(e @ DomainError::DivisionByZero) => CalcResult::from(Err(e)),
            Err(e) => return Err(e.into()),
        };

        Ok(CalculateResponse {
            result,
            num1,
            num2,
            operation,
        })
    }

    /// Gets the current history, newest first.
    pub async fn history(&self) -> Result<History, AppError> {
        self.store.read().await.map_err(Into::into)
    }

    /// Records `entry` and returns the updated history.
    pub async fn add_entry(&self, entry: HistoryEntry) -> Result<History, AppError> {
        let _guard = self.write_lock.lock().await;

        let mut history = self.store.read().await?;
        history.push(entry);
        self.store.write(&history).await?;
        Ok(history)
    }

    /// Empties the history.
    pub async fn clear_history(&self) -> Result<History, AppError> {
        let _guard = self.write_lock.lock().await;

        let history = History::new();
        self.store.write(&history).await?;
        Ok(history)
    }

    /// Applies a history request from the wire.
    pub async fn apply(&self, req: HistoryRequest) -> Result<History, AppError> {
        match req.action {
            HistoryAction::Add => {
                let entry = req
                    .entry
                    .ok_or_else(|| AppError::BadRequest("entry is required for add".into()))?;
                self.add_entry(entry).await
            }
            HistoryAction::Clear => self.clear_history().await,
        }
    }

    /// Whether the store can currently be read.
    pub async fn store_healthy(&self) -> bool {
        match self.store.read().await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!("History store health check failed: {}", e);
                false
            }
        }
    }

    /// Closes the underlying store.
    pub async fn shutdown(&self) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;
        self.store.close().await.map_err(Into::into)
    }
}
