//! Supported currencies and their spread groups.
//!
//! Currencies are declared once through `define_currencies!`, which generates
//! the `CurrencyCode` enum together with its lookup tables and parsing.
//!
//! # Adding a New Currency
//! Add a line to the macro invocation with the ISO code, the name NBP
//! publishes it under, and the spread group it is priced with:
//! ```ignore
//! define_currencies! {
//!     // ... existing currencies ...
//!     GBP => ("GBP", "funt szterling", Major),
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::trade::TradeSide;
use crate::error::DomainError;

// ─────────────────────────────────────────────────────────────────────────────
// Spread Groups
// ─────────────────────────────────────────────────────────────────────────────

/// Markdown applied to the mid-rate when the desk buys a major currency.
pub const MAJOR_BUY_MARKDOWN: f64 = 0.15;
/// Markup applied to the mid-rate when the desk sells a major currency.
pub const MAJOR_SELL_MARKUP: f64 = 0.11;
/// Markup applied to the mid-rate when the desk sells an exotic currency.
pub const EXOTIC_SELL_MARKUP: f64 = 0.20;

/// Pricing group a currency belongs to.
///
/// Major currencies are traded both ways. Exotic currencies are sell-only:
/// the desk never buys them back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SpreadGroup {
    Major,
    Exotic,
}

impl SpreadGroup {
    /// Signed spread added to the mid-rate for `side`, or `None` when the
    /// group does not trade on that side.
    pub fn spread(&self, side: TradeSide) -> Option<f64> {
        match (self, side) {
            (SpreadGroup::Major, TradeSide::Buy) => Some(-MAJOR_BUY_MARKDOWN),
            (SpreadGroup::Major, TradeSide::Sell) => Some(MAJOR_SELL_MARKUP),
            (SpreadGroup::Exotic, TradeSide::Buy) => None,
            (SpreadGroup::Exotic, TradeSide::Sell) => Some(EXOTIC_SELL_MARKUP),
        }
    }

    pub fn supports(&self, side: TradeSide) -> bool {
        self.spread(side).is_some()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// THE MACRO: Defines the CurrencyCode enum and its lookup tables
// ─────────────────────────────────────────────────────────────────────────────

/// Defines the supported currencies.
///
/// # Syntax
/// ```ignore
/// define_currencies! {
///     Variant => ("CODE", "nbp name", SpreadGroupVariant),
/// }
/// ```
macro_rules! define_currencies {
    (
        $(
            $name:ident => ($code:literal, $nbp_name:literal, $group:ident)
        ),* $(,)?
    ) => {
        /// Currency codes the desk quotes. Parsing is case-insensitive.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        #[serde(rename_all = "UPPERCASE")]
        pub enum CurrencyCode {
            $($name),*
        }

        impl CurrencyCode {
            pub fn code(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $code),*
                }
            }

            /// Name of the currency as published in NBP table A.
            pub fn nbp_name(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $nbp_name),*
                }
            }

            pub fn spread_group(&self) -> SpreadGroup {
                match self {
                    $(CurrencyCode::$name => SpreadGroup::$group),*
                }
            }

            pub fn all() -> &'static [CurrencyCode] {
                &[$(CurrencyCode::$name),*]
            }
        }

        impl std::str::FromStr for CurrencyCode {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_uppercase().as_str() {
                    $($code => Ok(CurrencyCode::$name),)*
                    _ => Err(DomainError::UnknownCurrency(s.to_string())),
                }
            }
        }
    };
}

// ─────────────────────────────────────────────────────────────────────────────
// CURRENCY DEFINITIONS
// ─────────────────────────────────────────────────────────────────────────────

define_currencies! {
    EUR => ("EUR", "euro", Major),
    USD => ("USD", "dolar amerykański", Major),
    CZK => ("CZK", "korona czeska", Exotic),
    IDR => ("IDR", "rupia indonezyjska", Exotic),
    BRL => ("BRL", "real (Brazylia)", Exotic),
}

impl CurrencyCode {
    /// Whether the desk quotes this currency on `side`.
    pub fn supports(&self, side: TradeSide) -> bool {
        self.spread_group().supports(side)
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
