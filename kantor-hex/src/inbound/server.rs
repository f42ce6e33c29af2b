//! HTTP Server configuration and startup.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    http::{Method, header},
    middleware,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use kantor_types::{HistoryStore, RateProvider};

use super::handlers::{self, AppState};
use super::rate_limit::{RateLimiterState, rate_limit_middleware};
use crate::{CalculatorService, CantorService};

/// HTTP Server for the Kantor API.
pub struct HttpServer<P: RateProvider, S: HistoryStore> {
    state: Arc<AppState<P, S>>,
    rate_limiter: Arc<RateLimiterState>,
}

impl<P: RateProvider, S: HistoryStore> HttpServer<P, S> {
    /// Creates a new HTTP server with the default limit of 100 req/min per client.
    pub fn new(
        cantor: CantorService<P>,
        calculator: CalculatorService<S>,
        environment: impl Into<String>,
    ) -> Self {
        Self {
            state: Arc::new(AppState {
                cantor,
                calculator,
                environment: environment.into(),
            }),
            rate_limiter: Arc::new(RateLimiterState::default()),
        }
    }

    /// Replaces the per-client limit.
    pub fn with_rate_limit(mut self, requests_per_minute: u32) -> Self {
        self.rate_limiter = Arc::new(RateLimiterState::new(
            requests_per_minute,
            Duration::from_secs(60),
        ));
        self
    }

    /// Shared state, for shutdown hooks.
    pub fn state(&self) -> Arc<AppState<P, S>> {
        self.state.clone()
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE]);

        let calculator = get(handlers::get_history::<P, S>).post(handlers::update_history::<P, S>);

        Router::new()
            .route("/api/health", get(handlers::health::<P, S>))
            .route("/api/rates/{code}", get(handlers::get_rate::<P, S>))
            .route(
                "/api/rates/{code}/history",
                get(handlers::get_rate_history::<P, S>),
            )
            .route(
                "/api/cantor/quote/{code}",
                get(handlers::get_quote::<P, S>),
            )
            .route("/api/tables/a", get(handlers::get_table::<P, S>))
            .route("/api/openapi.json", get(handlers::openapi_json))
            .route("/calculate.php", post(handlers::calculate::<P, S>))
            .route("/api/calculate", post(handlers::calculate::<P, S>))
            .route("/history.php", calculator.clone())
            .route("/api/history", calculator)
            .layer(middleware::from_fn_with_state(
                self.rate_limiter.clone(),
                rate_limit_middleware,
            ))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }
}

/// Binds `addr` and serves `router` until Ctrl+C or SIGTERM.
pub async fn serve(router: Router, addr: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
