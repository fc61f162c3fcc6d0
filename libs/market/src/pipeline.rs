use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::{fs, task};
use tracing::{debug, info};

use crate::chart;
use crate::indicators::macd::{MacdConfig, macd};
use crate::indicators::rsi::{DEFAULT_PERIOD, rsi};
use crate::price_client::{Lookback, PriceClient};

/// Outcome of one fetch → compute → render run.
#[derive(Debug)]
pub struct Report {
    pub symbol: String,
    pub bars: usize,
    pub last_close: f64,
    pub macd_chart: PathBuf,
    pub overview_chart: PathBuf,
}

/// Run the full pipeline for one ticker: download daily history, compute
/// MACD and RSI, render both charts into `out_dir`.
///
/// Any failure aborts the run before rendering; there are no retries and
/// no partial artifacts.
pub async fn analyze(
    client: &PriceClient,
    symbol: &str,
    lookback: Lookback,
    out_dir: &Path,
) -> Result<Report> {
    info!("fetching {} of daily bars for {}", lookback, symbol);
    let series = client
        .fetch_daily(symbol, lookback)
        .await
        .with_context(|| format!("could not download price history for {symbol}"))?;
    info!("fetched {} bars for {}", series.len(), symbol);

    let closes = series.closes();
    let dates = series.date_labels();

    debug!("computing MACD and RSI for {}", symbol);
    let macd_series = macd(&closes, &MacdConfig::default())?;
    let rsi_series = rsi(&closes, DEFAULT_PERIOD)?;

    fs::create_dir_all(out_dir)
        .await
        .with_context(|| format!("could not create output directory {}", out_dir.display()))?;

    let macd_path = out_dir.join(format!("{symbol}_macd.png"));
    let overview_path = out_dir.join(format!("{symbol}_indicators.html"));

    debug!("rendering MACD chart for {}", symbol);
    let png_bytes = {
        let symbol = symbol.to_string();
        let closes = closes.clone();
        let line = macd_series.macd.clone();
        let dates = dates.clone();
        task::spawn_blocking(move || chart::macd_chart(&symbol, &closes, &line, &dates)).await??
    };
    fs::write(&macd_path, &png_bytes)
        .await
        .with_context(|| format!("could not write {}", macd_path.display()))?;
    info!("wrote {} ({} bytes)", macd_path.display(), png_bytes.len());

    debug!("rendering indicator overview for {}", symbol);
    let html = {
        let symbol = symbol.to_string();
        let macd_series = macd_series.clone();
        let rsi_series = rsi_series.clone();
        let dates = dates.clone();
        task::spawn_blocking(move || {
            chart::overview_chart(&symbol, &closes, &rsi_series, &macd_series, &dates)
        })
        .await??
    };
    fs::write(&overview_path, html.as_bytes())
        .await
        .with_context(|| format!("could not write {}", overview_path.display()))?;
    info!("wrote {}", overview_path.display());

    Ok(Report {
        symbol: symbol.to_string(),
        bars: series.len(),
        last_close: series.last_close(),
        macd_chart: macd_path,
        overview_chart: overview_path,
    })
}
