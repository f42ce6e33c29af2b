//! # Kantor Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the NBP client and the history store
//! - Create the desk and calculator services
//! - Start the HTTP server

mod config;

use anyhow::Context;
use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kantor_hex::{
    CalculatorService, CantorService,
    inbound::{HttpServer, serve},
};
use kantor_repo::build_repo;
use nbp_rates::NbpClient;

fn init_tracer() -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()
        .context("failed to create OTLP span exporter")?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("kantor-service"), provider))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = config::Config::from_env()?;

    // OpenTelemetry export is opt-in
    let (telemetry, otel_provider) = if config.otel_enabled {
        let (tracer, provider) = init_tracer()?;
        (
            Some(tracing_opentelemetry::layer().with_tracer(tracer)),
            Some(provider),
        )
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,kantor_app=debug,kantor_hex=debug,nbp_rates=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry)
        .init();

    tracing::info!(
        "Starting kantor server on port {} ({})",
        config.port,
        config.environment
    );
    tracing::info!("Using NBP API at {}", config.nbp_api_url);

    let rates = NbpClient::with_timeout(&config.nbp_api_url, config.nbp_timeout)?;
    let repo = build_repo(&config.history_file).await?;

    let server = HttpServer::new(
        CantorService::new(rates),
        CalculatorService::new(repo),
        config.environment.clone(),
    )
    .with_rate_limit(config.rate_limit_per_minute);
    let state = server.state();

    let mut router = server.router();
    if config.otel_enabled {
        // Records into the globally set MeterProvider
        router = router.layer(axum_otel_metrics::HttpMetricsLayerBuilder::new().build());
    }

    let addr = format!("0.0.0.0:{}", config.port);
    serve(router, &addr).await?;

    if let Err(e) = state.calculator.shutdown().await {
        tracing::warn!("Failed to close history store: {}", e);
    }

    // Ensure traces are flushed before exit
    if let Some(provider) = otel_provider {
        let _ = provider.shutdown();
    }
    Ok(())
}
