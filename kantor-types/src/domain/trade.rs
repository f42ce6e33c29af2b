//! Trade sides, the pricing rule and desk quotes.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::currency::CurrencyCode;
use super::rate::Rate;
use crate::error::DomainError;

/// Side of a trade, seen from the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSide::Buy => "buy",
            TradeSide::Sell => "sell",
        }
    }

    pub fn upper(&self) -> &'static str {
        match self {
            TradeSide::Buy => "BUY",
            TradeSide::Sell => "SELL",
        }
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TradeSide {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buy" => Ok(TradeSide::Buy),
            "sell" => Ok(TradeSide::Sell),
            _ => Err(DomainError::InvalidArgument(format!(
                "Invalid trade side: {}",
                s
            ))),
        }
    }
}

/// Rounds a price to the four decimal places NBP publishes mid-rates with.
fn round_price(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Applies the desk spread for `code` and `side` to a mid-rate.
pub fn price(code: CurrencyCode, side: TradeSide, mid: f64) -> Result<f64, DomainError> {
    let spread = code
        .spread_group()
        .spread(side)
        .ok_or(DomainError::UnsupportedOperation { code, side })?;

    Ok(round_price(mid + spread))
}

/// A desk price derived from an NBP mid-rate. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub code: CurrencyCode,
    pub side: TradeSide,
    /// NBP mid-rate the price was derived from
    #[schema(example = 4.25)]
    pub nbp_mid: f64,
    /// Desk price in PLN
    #[schema(example = 4.1)]
    pub price: f64,
    #[schema(value_type = String, example = "2025-09-19")]
    pub effective_date: NaiveDate,
}

impl Quote {
    /// Prices `rate` for `side`.
    pub fn from_rate(rate: &Rate, side: TradeSide) -> Result<Self, DomainError> {
        let price = price(rate.code(), side, rate.mid())?;
        Ok(Self {
            code: rate.code(),
            side,
            nbp_mid: rate.mid(),
            price,
            effective_date: rate.effective_date(),
        })
    }
}
