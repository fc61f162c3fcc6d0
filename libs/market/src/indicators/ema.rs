use ta::Next;
use ta::indicators::ExponentialMovingAverage;

use crate::error::ComputeError;

/// Exponential moving average with smoothing factor `2 / (span + 1)`.
///
/// The first output equals the first input, so the result has the same
/// length as `values` with no warm-up gap. An empty input yields an empty
/// output.
pub fn ema(values: &[f64], span: usize) -> Result<Vec<f64>, ComputeError> {
    let mut ema = ExponentialMovingAverage::new(span)
        .map_err(|_| ComputeError::InvalidSpan { indicator: "EMA" })?;

    Ok(values.iter().map(|&x| ema.next(x)).collect())
}
