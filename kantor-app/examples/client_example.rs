//! Client example driving the desk and the calculator against a local server.
//!
//! Run with: cargo run -p kantor-app --example client_example
//!
//! Rates are fetched from the live NBP API; the calculator history lives in
//! a temp file.

use kantor_client::KantorClient;
use kantor_hex::{CalculatorService, CantorService, inbound::HttpServer};
use kantor_repo::build_repo;
use kantor_types::{CalcResult, CurrencyCode, HistoryEntry, TradeSide};
use nbp_rates::{DEFAULT_BASE_URL, NbpClient};
use std::net::SocketAddr;
use tempfile::tempdir;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Find an available port
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;
    let port = addr.port();
    drop(listener);

    let tmp = tempdir()?;
    let history_path = tmp.path().join("history.json");
    let history_location = history_path.display().to_string();

    println!("🚀 Starting server on port {port}...");
    println!("   History file: {history_location}");

    let server = HttpServer::new(
        CantorService::new(NbpClient::new(DEFAULT_BASE_URL)?),
        CalculatorService::new(build_repo(&history_location).await?),
        "example",
    );
    let router = server.router();

    let server_addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&server_addr).await?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router.into_make_service()).await {
            eprintln!("server error: {e}");
        }
    });

    let client = KantorClient::new(format!("http://127.0.0.1:{port}"));

    // ─────────────────────────────────────────────────────────────────────────
    // Demo: desk
    // ─────────────────────────────────────────────────────────────────────────

    let health = client.health().await?;
    println!("✅ Server health: {:?}", health.status);

    match client.quote(CurrencyCode::EUR, TradeSide::Sell, None).await {
        Ok(quote) => println!(
            "✅ EUR sell: {:.4} PLN (mid {:.4}, {})",
            quote.price, quote.nbp_mid, quote.effective_date
        ),
        // No table is published on weekends and holidays
        Err(e) => println!("⚠️  EUR quote unavailable today: {e}"),
    }

    let response = client.quote(CurrencyCode::IDR, TradeSide::Buy, None).await;
    assert!(response.is_err());
    println!("✅ IDR buy rejected: {}", response.unwrap_err());

    // ─────────────────────────────────────────────────────────────────────────
    // Demo: calculator
    // ─────────────────────────────────────────────────────────────────────────

    for (a, op, b) in [(12.0, "*", 3.5), (7.0, "/", 0.0), (100.0, "-", 42.0)] {
        let resp = client.calculate(a, b, op).await?;
        println!("✅ {a} {op} {b} = {:?}", resp.result);

        let entry = HistoryEntry::new(
            format!("{a} {op} {b}"),
            resp.result,
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        );
        client.add_history(entry).await?;
    }

    let history = client.history().await?;
    println!("\n📋 History ({} entries):", history.len());
    for entry in history.entries() {
        let shown = match &entry.result {
            CalcResult::Value(v) => v.to_string(),
            CalcResult::Message(m) => m.clone(),
        };
        println!("   - {} = {}", entry.expression, shown);
    }

    client.clear_history().await?;
    println!("✅ History cleared");

    println!("\n🎉 Example completed successfully!");

    Ok(())
}
