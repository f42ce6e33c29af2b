//! Kantor CLI
//!
//! Command-line interface for the Kantor API.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use kantor_client::KantorClient;
use kantor_types::{CalcResult, CurrencyCode, HistoryEntry, ServiceStatus, TradeSide};

#[derive(Parser)]
#[command(name = "kantor")]
#[command(author, version, about = "Kantor API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Kantor API
    #[arg(long, env = "KANTOR_API_URL", default_value = "http://localhost:8000")]
    api_url: String,

    /// Client address sent as X-Forwarded-For
    #[arg(long, env = "KANTOR_CLIENT_ID")]
    client_id: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check API health
    Health,
    /// NBP mid-rate of a currency
    Rate {
        /// Currency code (EUR, USD, CZK, IDR, BRL)
        code: CurrencyCode,
        /// Day to look up, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Fourteen days of mid-rates ending on a date
    History {
        code: CurrencyCode,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Desk buy or sell price
    Quote {
        code: CurrencyCode,
        /// buy or sell
        #[arg(long)]
        side: TradeSide,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Whole NBP table A
    Table {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Run one calculation
    #[command(allow_negative_numbers = true)]
    Calc {
        num1: f64,
        /// One of + - * /
        operation: String,
        num2: f64,
        /// Also record the calculation in the shared history
        #[arg(long)]
        record: bool,
    },
    /// Calculator history operations
    CalcHistory {
        #[command(subcommand)]
        action: CalcHistoryCommands,
    },
}

#[derive(Subcommand)]
enum CalcHistoryCommands {
    /// Show the history, newest first
    List,
    /// Empty the history
    Clear,
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn history_entry(num1: f64, operation: &str, num2: f64, result: CalcResult) -> HistoryEntry {
    HistoryEntry::new(
        format!("{} {} {}", num1, operation, num2),
        result,
        Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut client = KantorClient::new(&cli.api_url);
    if let Some(id) = cli.client_id {
        client = client.with_forwarded_for(id);
    }

    match cli.command {
        Commands::Health => {
            let health = client.health().await?;
            print_json(&health)?;
            if health.status != ServiceStatus::Healthy {
                std::process::exit(1);
            }
        }

        Commands::Rate { code, date } => print_json(&client.rate(code, date).await?)?,

        Commands::History { code, date } => {
            print_json(&client.rate_history(code, date).await?)?
        }

        Commands::Quote { code, side, date } => {
            print_json(&client.quote(code, side, date).await?)?
        }

        Commands::Table { date } => print_json(&client.table(date).await?)?,

        Commands::Calc {
            num1,
            operation,
            num2,
            record,
        } => {
            let resp = client.calculate(num1, num2, &operation).await?;
            if record {
                let entry = history_entry(num1, &operation, num2, resp.result.clone());
                client.add_history(entry).await?;
            }
            print_json(&resp)?;
        }

        Commands::CalcHistory { action } => match action {
            CalcHistoryCommands::List => print_json(&client.history().await?)?,
            CalcHistoryCommands::Clear => {
                client.clear_history().await?;
                println!("✓ History cleared");
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_quote() {
        let cli = Cli::try_parse_from([
            "kantor", "quote", "eur", "--side", "SELL", "--date", "2025-09-19",
        ])
        .unwrap();

        match cli.command {
            Commands::Quote { code, side, date } => {
                assert_eq!(code, CurrencyCode::EUR);
                assert_eq!(side, TradeSide::Sell);
                assert_eq!(date, NaiveDate::from_ymd_opt(2025, 9, 19));
            }
            _ => panic!("expected quote"),
        }
    }

    #[test]
    fn test_parse_calc_with_negative_operands() {
        let cli = Cli::try_parse_from(["kantor", "calc", "-5", "-", "-2.5"]).unwrap();

        match cli.command {
            Commands::Calc {
                num1,
                operation,
                num2,
                record,
            } => {
                assert_eq!(num1, -5.0);
                assert_eq!(operation, "-");
                assert_eq!(num2, -2.5);
                assert!(!record);
            }
            _ => panic!("expected calc"),
        }
    }

    #[test]
    fn test_unknown_currency_rejected() {
        assert!(Cli::try_parse_from(["kantor", "rate", "XYZ"]).is_err());
    }

    #[test]
    fn test_history_entry_expression() {
        let entry = history_entry(5.0, "+", 3.0, CalcResult::Value(8.0));
        assert_eq!(entry.expression, "5 + 3");
        assert_eq!(entry.result, CalcResult::Value(8.0));
    }
}
