pub mod ema;
pub mod macd;
pub mod rsi;

use crate::error::ComputeError;

/// Entry-point validation shared by the indicator functions: the input must
/// be non-empty and fully numeric, otherwise we fail fast instead of letting
/// NaN drift into a chart.
fn validate_closes(closes: &[f64], indicator: &'static str) -> Result<(), ComputeError> {
    if closes.is_empty() {
        return Err(ComputeError::EmptyInput { indicator });
    }
    if let Some(index) = closes.iter().position(|x| !x.is_finite()) {
        return Err(ComputeError::NonFinite { indicator, index });
    }
    Ok(())
}
