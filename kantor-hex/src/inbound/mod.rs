//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server that drives the application layer.

pub mod handlers;
mod rate_limit;
mod server;

pub use rate_limit::{RateLimiterState, client_key};
pub use server::{HttpServer, serve};
