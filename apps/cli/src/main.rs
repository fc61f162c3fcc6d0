use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use market::{Lookback, PriceClient, analyze};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "tickerplot")]
#[command(about = "Render MACD and RSI charts for a stock ticker")]
#[command(version)]
struct Cli {
    /// Ticker symbol (e.g. AAPL); prompted for interactively when omitted
    symbol: Option<String>,

    /// How much daily history to download (1mo, 3mo, 6mo, 1y, 2y, 5y)
    #[arg(short, long, default_value = "1y")]
    period: Lookback,

    /// Directory to write the rendered charts into
    #[arg(short, long)]
    out_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    let symbol = match cli.symbol {
        Some(s) => s.trim().to_uppercase(),
        None => prompt_symbol()?,
    };
    if symbol.is_empty() {
        bail!("no ticker symbol provided");
    }

    let client = PriceClient::new(config.base_api, config.key_id, config.secret)?;
    let out_dir = cli.out_dir.unwrap_or(config.out_dir);

    match analyze(&client, &symbol, cli.period, &out_dir).await {
        Ok(report) => {
            info!("completed analysis for {}", report.symbol);
            println!(
                "{}: {} bars, last close ${:.2}",
                report.symbol, report.bars, report.last_close
            );
            println!("MACD chart:      {}", report.macd_chart.display());
            println!("Indicator chart: {}", report.overview_chart.display());
            Ok(())
        }
        Err(e) => {
            error!("analysis failed for {}: {:#}", symbol, e);
            Err(e)
        }
    }
}

fn prompt_symbol() -> Result<String> {
    print!("Enter stock ticker symbol: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_uppercase())
}
