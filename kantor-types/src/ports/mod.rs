//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The application layer depends on these traits, not concrete implementations.

mod history;
mod rates;

pub use history::HistoryStore;
pub use rates::{RateError, RateProvider};
