use super::validate_closes;
use crate::error::ComputeError;

pub const DEFAULT_PERIOD: usize = 14;

/// Relative Strength Index over a rolling window.
///
/// Average gain and loss are simple moving averages of the trailing
/// `period` close-to-close deltas. The output is aligned with the input:
/// the first `period` entries are `None` because the window is not yet
/// full, every later entry is a value in [0, 100].
pub fn rsi(closes: &[f64], period: usize) -> Result<Vec<Option<f64>>, ComputeError> {
    validate_closes(closes, "RSI")?;
    if period == 0 {
        return Err(ComputeError::InvalidSpan { indicator: "RSI" });
    }

    let mut out = vec![None; closes.len()];
    if closes.len() <= period {
        return Ok(out);
    }

    // deltas[i] is the move into closes[i + 1]
    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();

    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;

    for (i, &delta) in deltas.iter().enumerate() {
        gain_sum += delta.max(0.0);
        loss_sum += (-delta).max(0.0);

        if i >= period {
            let evicted = deltas[i - period];
            gain_sum -= evicted.max(0.0);
            loss_sum -= (-evicted).max(0.0);
        }

        if i + 1 >= period {
            let avg_gain = gain_sum / period as f64;
            let avg_loss = loss_sum / period as f64;
            out[i + 1] = Some(rsi_from_averages(avg_gain, avg_loss));
        }
    }

    Ok(out)
}

/// A flat window (no gains, no losses) is neutral; a loss-free window with
/// gains saturates at 100 instead of dividing by zero.
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0
    } else if avg_loss == 0.0 {
        100.0
    } else {
        let rs = avg_gain / avg_loss;
        100.0 - 100.0 / (1.0 + rs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ComputeError;

    #[test]
    fn empty_input_is_rejected() {
        let err = rsi(&[], DEFAULT_PERIOD).unwrap_err();
        assert!(matches!(err, ComputeError::EmptyInput { .. }));
    }

    #[test]
    fn zero_period_is_rejected() {
        let err = rsi(&[1.0, 2.0, 3.0], 0).unwrap_err();
        assert!(matches!(err, ComputeError::InvalidSpan { .. }));
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let err = rsi(&[1.0, f64::NAN], DEFAULT_PERIOD).unwrap_err();
        assert!(matches!(err, ComputeError::NonFinite { index: 1, .. }));
    }

    #[test]
    fn single_point_series_is_all_undefined() {
        assert_eq!(rsi(&[42.0], DEFAULT_PERIOD).unwrap(), vec![None]);
    }

    #[test]
    fn short_series_is_all_undefined() {
        let closes: Vec<f64> = (1..=10).map(|i| i as f64).collect();
        let out = rsi(&closes, DEFAULT_PERIOD).unwrap();
        assert_eq!(out.len(), closes.len());
        assert!(out.iter().all(Option::is_none));
    }

    #[test]
    fn strictly_increasing_series_saturates_at_100() {
        let closes: Vec<f64> = (1..=30).map(|i| i as f64).collect();
        let out = rsi(&closes, DEFAULT_PERIOD).unwrap();

        for v in &out[..DEFAULT_PERIOD] {
            assert!(v.is_none());
        }
        for v in &out[DEFAULT_PERIOD..] {
            assert_eq!(v.unwrap(), 100.0);
        }
    }

    #[test]
    fn strictly_decreasing_series_pins_at_0() {
        let closes: Vec<f64> = (1..=30).rev().map(|i| i as f64).collect();
        let out = rsi(&closes, DEFAULT_PERIOD).unwrap();

        for v in &out[DEFAULT_PERIOD..] {
            assert_eq!(v.unwrap(), 0.0);
        }
    }

    #[test]
    fn flat_series_is_neutral() {
        let closes = vec![100.0; 30];
        let out = rsi(&closes, DEFAULT_PERIOD).unwrap();

        for v in &out[..DEFAULT_PERIOD] {
            assert!(v.is_none());
        }
        for v in &out[DEFAULT_PERIOD..] {
            assert_eq!(v.unwrap(), 50.0);
        }
    }

    #[test]
    fn window_evicts_old_deltas() {
        // period 2: the early gain and loss leave the window after two steps
        let closes = vec![1.0, 2.0, 1.0, 1.0, 1.0];
        let out = rsi(&closes, 2).unwrap();
        assert_eq!(out, vec![None, None, Some(50.0), Some(0.0), Some(50.0)]);
    }

    #[test]
    fn mixed_series_stays_within_bounds() {
        let closes = vec![
            10.0, 11.0, 12.0, 11.0, 10.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0, 13.0, 12.0, 11.0,
            10.0, 11.0, 12.0, 13.0, 14.0, 15.0,
        ];
        let out = rsi(&closes, DEFAULT_PERIOD).unwrap();

        assert_eq!(out.len(), 20);
        for v in &out[..14] {
            assert!(v.is_none());
        }
        for v in &out[14..] {
            let v = v.unwrap();
            assert!(v.is_finite());
            assert!((0.0..=100.0).contains(&v), "RSI {v} out of range");
        }
    }
}
