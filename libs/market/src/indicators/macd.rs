use super::ema::ema;
use super::validate_closes;
use crate::error::ComputeError;

/// MACD spans. The signal line is optional; leave it `None` to compute the
/// MACD line alone.
#[derive(Debug, Clone)]
pub struct MacdConfig {
    pub fast_span: usize,
    pub slow_span: usize,
    pub signal_span: Option<usize>,
}

impl Default for MacdConfig {
    fn default() -> Self {
        Self {
            fast_span: 12,
            slow_span: 26,
            signal_span: Some(9),
        }
    }
}

/// MACD output, aligned index-for-index with the input closes.
#[derive(Debug, Clone)]
pub struct MacdSeries {
    pub macd: Vec<f64>,
    pub signal: Option<Vec<f64>>,
}

/// MACD line: fast EMA minus slow EMA of the closes, plus an EMA of the
/// MACD line itself when a signal span is configured. Every entry is
/// defined since the EMAs carry no warm-up gap.
pub fn macd(closes: &[f64], config: &MacdConfig) -> Result<MacdSeries, ComputeError> {
    validate_closes(closes, "MACD")?;

    let fast = ema(closes, config.fast_span)?;
    let slow = ema(closes, config.slow_span)?;
    let line: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();

    let signal = match config.signal_span {
        Some(span) => Some(ema(&line, span)?),
        None => None,
    };

    Ok(MacdSeries { macd: line, signal })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ComputeError;

    #[test]
    fn empty_input_is_rejected() {
        let err = macd(&[], &MacdConfig::default()).unwrap_err();
        assert!(matches!(err, ComputeError::EmptyInput { .. }));
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let closes = vec![1.0, f64::INFINITY, 3.0];
        let err = macd(&closes, &MacdConfig::default()).unwrap_err();
        assert!(matches!(err, ComputeError::NonFinite { index: 1, .. }));
    }

    #[test]
    fn constant_series_is_identically_zero() {
        let closes = vec![100.0; 30];
        let out = macd(&closes, &MacdConfig::default()).unwrap();

        assert_eq!(out.macd.len(), closes.len());
        for v in &out.macd {
            assert_eq!(*v, 0.0);
        }
        for v in out.signal.as_ref().unwrap() {
            assert_eq!(*v, 0.0);
        }
    }

    #[test]
    fn equal_spans_cancel_out() {
        let closes: Vec<f64> = (1..=40).map(|i| (i as f64).sin() * 10.0 + 50.0).collect();
        let config = MacdConfig {
            fast_span: 12,
            slow_span: 12,
            signal_span: None,
        };
        let out = macd(&closes, &config).unwrap();
        for v in &out.macd {
            assert_eq!(*v, 0.0);
        }
    }

    #[test]
    fn single_point_series_degrades_to_zero() {
        let out = macd(&[42.0], &MacdConfig::default()).unwrap();
        assert_eq!(out.macd, vec![0.0]);
        assert_eq!(out.signal.unwrap(), vec![0.0]);
    }

    #[test]
    fn signal_is_omitted_when_not_configured() {
        let closes: Vec<f64> = (1..=20).map(|i| i as f64).collect();
        let config = MacdConfig {
            signal_span: None,
            ..Default::default()
        };
        let out = macd(&closes, &config).unwrap();
        assert_eq!(out.macd.len(), closes.len());
        assert!(out.signal.is_none());
    }

    #[test]
    fn signal_is_the_ema_of_the_macd_line() {
        let closes: Vec<f64> = (1..=50).map(|i| (i as f64 * 0.3).cos() * 5.0 + 100.0).collect();
        let out = macd(&closes, &MacdConfig::default()).unwrap();
        let expected = ema(&out.macd, 9).unwrap();
        assert_eq!(out.signal.unwrap(), expected);
    }
}
