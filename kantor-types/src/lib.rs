//! # Kantor Types
//!
//! Domain types and port traits for the currency desk and calculator.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Currencies, rates, quotes, calculator and history types
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    CalcResult, CurrencyCode, HISTORY_CAPACITY, History, HistoryEntry, Operation, Quote, Rate,
    RateTable, SpreadGroup, TableRate, TradeSide, calculate, price,
};
pub use dto::*;
pub use error::{AppError, DomainError, RepoError};
pub use ports::{HistoryStore, RateError, RateProvider};
