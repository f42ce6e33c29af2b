//! NBP mid-rates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::currency::CurrencyCode;
use crate::error::DomainError;

/// Official NBP mid-rate of one currency on one day.
///
/// Immutable once fetched; construct through [`Rate::new`], which rejects
/// non-positive or non-finite mids.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Rate {
    code: CurrencyCode,
    #[schema(example = 4.25)]
    mid: f64,
    #[schema(value_type = String, example = "2025-09-19")]
    effective_date: NaiveDate,
}

impl Rate {
    pub fn new(code: CurrencyCode, mid: f64, effective_date: NaiveDate) -> Result<Self, DomainError> {
        if !mid.is_finite() || mid <= 0.0 {
            return Err(DomainError::InvalidRate(mid));
        }
        Ok(Self {
            code,
            mid,
            effective_date,
        })
    }

    pub fn code(&self) -> CurrencyCode {
        self.code
    }

    pub fn mid(&self) -> f64 {
        self.mid
    }

    pub fn effective_date(&self) -> NaiveDate {
        self.effective_date
    }
}

/// One row of an NBP table. Covers every published currency, not only the
/// ones the desk quotes, so the code stays a plain string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TableRate {
    #[schema(example = "EUR")]
    pub code: String,
    #[schema(example = "euro")]
    pub currency: String,
    #[schema(example = 4.25)]
    pub mid: f64,
}

/// A full NBP table A publication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RateTable {
    #[schema(example = "A")]
    pub table: String,
    /// Publication number, e.g. `182/A/NBP/2025`
    pub no: String,
    #[schema(value_type = String, example = "2025-09-19")]
    pub effective_date: NaiveDate,
    pub rates: Vec<TableRate>,
}

impl RateTable {
    /// Finds the row for `code`, if the table publishes it.
    pub fn find(&self, code: CurrencyCode) -> Option<&TableRate> {
        self.rates.iter().find(|r| r.code == code.code())
    }
}
