use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue},
};
use serde::Deserialize;
use tracing::debug;

use crate::error::FetchError;
use crate::series::PriceSeries;

#[derive(Clone)]
pub struct PriceClient {
    client: Client,
    base_api: String,
}

impl PriceClient {
    pub fn new(base_api: String, key_id: String, secret: String) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert("APCA-API-KEY-ID", HeaderValue::from_str(&key_id)?);
        headers.insert("APCA-API-SECRET-KEY", HeaderValue::from_str(&secret)?);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self { client, base_api })
    }

    /// Download daily bars for `symbol` over the given lookback window.
    ///
    /// An unknown symbol comes back from the provider as an empty bar list;
    /// that surfaces as [`FetchError::NoData`], the same way a transport
    /// failure surfaces as [`FetchError::Http`].
    pub async fn fetch_daily(
        &self,
        symbol: &str,
        lookback: Lookback,
    ) -> Result<PriceSeries, FetchError> {
        let end = Utc::now();
        let start = end - lookback.duration();

        let url = format!(
            "{}/v2/stocks/{}/bars",
            self.base_api.trim_end_matches('/'),
            symbol
        );

        debug!("requesting {} of daily bars from {}", lookback, url);

        let res: BarsResponse = self
            .client
            .get(url)
            .query(&[
                ("feed", "iex"),
                ("timeframe", "1Day"),
                ("start", &start.to_rfc3339()),
                ("end", &end.to_rfc3339()),
                ("limit", "10000"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        PriceSeries::from_bars(symbol, res.bars)
    }
}

/// How much daily history to download, mirroring the period strings the
/// CLI accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookback {
    Month1,
    Month3,
    Month6,
    Year1,
    Year2,
    Year5,
}

impl Lookback {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lookback::Month1 => "1mo",
            Lookback::Month3 => "3mo",
            Lookback::Month6 => "6mo",
            Lookback::Year1 => "1y",
            Lookback::Year2 => "2y",
            Lookback::Year5 => "5y",
        }
    }

    pub fn duration(&self) -> Duration {
        match self {
            Lookback::Month1 => Duration::days(30),
            Lookback::Month3 => Duration::days(91),
            Lookback::Month6 => Duration::days(182),
            Lookback::Year1 => Duration::days(365),
            Lookback::Year2 => Duration::days(730),
            Lookback::Year5 => Duration::days(1825),
        }
    }
}

impl fmt::Display for Lookback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lookback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1mo" => Ok(Lookback::Month1),
            "3mo" => Ok(Lookback::Month3),
            "6mo" => Ok(Lookback::Month6),
            "1y" => Ok(Lookback::Year1),
            "2y" => Ok(Lookback::Year2),
            "5y" => Ok(Lookback::Year5),
            other => Err(format!(
                "unknown period '{other}' (expected one of 1mo, 3mo, 6mo, 1y, 2y, 5y)"
            )),
        }
    }
}

//
// Match Alpaca API JSON
// https://docs.alpaca.markets/reference/stockbars
//
#[derive(Debug, Deserialize, Clone)]
pub struct BarsResponse {
    #[serde(default)]
    pub bars: Vec<Bar>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Bar {
    #[serde(rename = "t")]
    pub timestamp: DateTime<Utc>,

    #[serde(rename = "o")]
    pub open: f64,

    #[serde(rename = "h")]
    pub high: f64,

    #[serde(rename = "l")]
    pub low: f64,

    #[serde(rename = "c")]
    pub close: f64,

    #[serde(rename = "v")]
    pub volume: i64,
}
