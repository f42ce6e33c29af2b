//! Rate limiting middleware using Governor.
//!
//! One keyed limiter holds a token bucket per client, keyed on the first
//! `X-Forwarded-For` hop. Idle buckets are pruned once the store grows past
//! [`MAX_TRACKED_CLIENTS`].

use axum::{
    Json,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter, clock::Clock};
use serde_json::json;
use std::{num::NonZeroU32, sync::Arc, time::Duration};

/// Paths that are never limited.
const EXEMPT_PATHS: &[&str] = &["/api/health"];

/// Key used when the client cannot be identified.
const ANONYMOUS: &str = "anonymous";

/// Store size above which idle buckets are dropped.
pub const MAX_TRACKED_CLIENTS: usize = 10_000;

/// Rate limiter state shared across requests.
pub struct RateLimiterState {
    limiter: DefaultKeyedRateLimiter<String>,
}

impl Default for RateLimiterState {
    fn default() -> Self {
        Self::new(100, Duration::from_secs(60))
    }
}

impl RateLimiterState {
    /// Creates a limiter allowing `requests` per `period`, all of which may
    /// arrive as one burst.
    pub fn new(requests: u32, period: Duration) -> Self {
        let burst = NonZeroU32::new(requests).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::with_period(period / burst.get())
            .map(|q| q.allow_burst(burst))
            .unwrap_or_else(|| Quota::per_minute(burst));

        Self {
            limiter: RateLimiter::keyed(quota),
        }
    }

    /// Takes one token for `key`. On an empty bucket returns how long until
    /// the next token.
    pub fn check(&self, key: &str) -> Result<(), Duration> {
        let outcome = self
            .limiter
            .check_key(&key.to_string())
            .map_err(|not_until| not_until.wait_time_from(self.limiter.clock().now()));

        if self.limiter.len() > MAX_TRACKED_CLIENTS {
            self.prune();
        }

        outcome
    }

    /// Drops buckets that have refilled completely.
    pub fn prune(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    /// Number of clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.limiter.len()
    }
}

/// Identifies the client: first `X-Forwarded-For` entry, else anonymous.
pub fn client_key(headers: &HeaderMap) -> String {
    headers
        .get("X-Forwarded-For")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(ANONYMOUS)
        .to_string()
}

/// Whole seconds to wait, rounded up and never zero.
fn retry_after_seconds(wait: Duration) -> u64 {
    (wait.as_secs_f64().ceil() as u64).max(1)
}

/// Rate limiting middleware.
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiterState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if EXEMPT_PATHS.contains(&request.uri().path()) {
        return next.run(request).await;
    }

    let key = client_key(request.headers());

    if let Err(wait) = limiter.check(&key) {
        let retry_after = retry_after_seconds(wait);
        tracing::warn!(client = %key, retry_after, "Rate limit exceeded");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({
                "error": "Rate limit exceeded. Please try again later.",
                "code": StatusCode::TOO_MANY_REQUESTS.as_u16(),
                "retry_after_seconds": retry_after
            })),
        )
            .into_response();
    }

    next.run(request).await
}
