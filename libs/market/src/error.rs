use thiserror::Error;

/// Failures while downloading or validating price history.
///
/// An empty result and a transport failure are both fatal for the run:
/// callers abort before any indicator is computed.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("no price data found for {symbol}")]
    NoData { symbol: String },

    #[error("price history for {symbol} is not strictly ordered by date")]
    Unordered { symbol: String },

    #[error("non-finite close price for {symbol} on {date}")]
    InvalidClose { symbol: String, date: String },

    #[error("price request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid API credentials: {0}")]
    Credentials(#[from] reqwest::header::InvalidHeaderValue),
}

/// Malformed input handed to an indicator function.
#[derive(Debug, Error)]
pub enum ComputeError {
    #[error("{indicator} requires a non-empty price series")]
    EmptyInput { indicator: &'static str },

    #[error("{indicator} span must be positive")]
    InvalidSpan { indicator: &'static str },

    #[error("{indicator} input contains a non-finite value at index {index}")]
    NonFinite { indicator: &'static str, index: usize },
}
