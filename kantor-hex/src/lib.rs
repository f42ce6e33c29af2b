//! # Kantor Hex
//!
//! Application service layer and HTTP adapter for the kantor service.
//!
//! ## Architecture
//!
//! - `service/` - Application services (orchestrate domain operations)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `openapi/` - OpenAPI document served at `/api/openapi.json`
//!
//! `CantorService` is generic over `P: RateProvider` and
//! `CalculatorService` over `S: HistoryStore`, allowing different
//! adapters to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;


pub use service::{CalculatorService, CantorService, HISTORY_WINDOW_DAYS};
