//! Domain models for the kantor service.

pub mod calculator;
pub mod currency;
pub mod history;
pub mod rate;
pub mod trade;

pub use calculator::{Operation, calculate};
pub use currency::{CurrencyCode, SpreadGroup};
pub use history::{CalcResult, HISTORY_CAPACITY, History, HistoryEntry};
pub use rate::{Rate, RateTable, TableRate};
pub use trade::{Quote, TradeSide, price};
