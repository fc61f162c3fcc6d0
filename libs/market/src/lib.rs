mod price_client;
mod series;

pub mod chart;
pub mod error;
pub mod indicators;
pub mod pipeline;

pub use error::{ComputeError, FetchError};
pub use pipeline::{Report, analyze};
pub use price_client::{Bar, Lookback, PriceClient};
pub use series::PriceSeries;
