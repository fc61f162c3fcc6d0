use crate::error::FetchError;
use crate::price_client::Bar;

/// A validated, immutable run of daily bars for one symbol.
///
/// Construction guarantees the series is non-empty, strictly increasing by
/// date with no duplicates, and free of non-finite closes. Indicator engines
/// read from it and return new parallel vectors; nothing mutates the series
/// after it is built.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    symbol: String,
    bars: Vec<Bar>,
}

impl PriceSeries {
    pub fn from_bars(symbol: &str, bars: Vec<Bar>) -> Result<Self, FetchError> {
        if bars.is_empty() {
            return Err(FetchError::NoData {
                symbol: symbol.to_string(),
            });
        }

        if let Some(bar) = bars.iter().find(|b| !b.close.is_finite()) {
            return Err(FetchError::InvalidClose {
                symbol: symbol.to_string(),
                date: bar.timestamp.format("%Y-%m-%d").to_string(),
            });
        }

        if bars.windows(2).any(|w| w[1].timestamp <= w[0].timestamp) {
            return Err(FetchError::Unordered {
                symbol: symbol.to_string(),
            });
        }

        Ok(Self {
            symbol: symbol.to_string(),
            bars,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Date labels for the chart category axis.
    pub fn date_labels(&self) -> Vec<String> {
        self.bars
            .iter()
            .map(|b| b.timestamp.format("%Y-%m-%d").to_string())
            .collect()
    }

    pub fn last_close(&self) -> f64 {
        // non-empty by construction
        self.bars[self.bars.len() - 1].close
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use chrono::{TimeZone, Utc};

    fn bar(day: u32, close: f64) -> Bar {
        let timestamp = Utc.with_ymd_and_hms(2024, 1, day, 5, 0, 0).unwrap();
        Bar {
            timestamp,
            open: close,
            high: close,
            low: close,
            close,
            volume: 1000,
        }
    }

    #[test]
    fn empty_bars_are_rejected() {
        let err = PriceSeries::from_bars("AAPL", Vec::new()).unwrap_err();
        assert!(matches!(err, FetchError::NoData { .. }));
    }

    #[test]
    fn out_of_order_bars_are_rejected() {
        let err = PriceSeries::from_bars("AAPL", vec![bar(3, 10.0), bar(2, 11.0)]).unwrap_err();
        assert!(matches!(err, FetchError::Unordered { .. }));
    }

    #[test]
    fn duplicate_dates_are_rejected() {
        let err = PriceSeries::from_bars("AAPL", vec![bar(2, 10.0), bar(2, 11.0)]).unwrap_err();
        assert!(matches!(err, FetchError::Unordered { .. }));
    }

    #[test]
    fn non_finite_close_is_rejected() {
        let err =
            PriceSeries::from_bars("AAPL", vec![bar(2, 10.0), bar(3, f64::NAN)]).unwrap_err();
        match err {
            FetchError::InvalidClose { date, .. } => assert_eq!(date, "2024-01-03"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn accessors_project_the_bars() {
        let series =
            PriceSeries::from_bars("aapl", vec![bar(2, 10.0), bar(3, 11.5), bar(4, 9.25)])
                .unwrap();

        assert_eq!(series.symbol(), "aapl");
        assert_eq!(series.len(), 3);
        assert!(!series.is_empty());
        assert_eq!(series.closes(), vec![10.0, 11.5, 9.25]);
        assert_eq!(
            series.date_labels(),
            vec!["2024-01-02", "2024-01-03", "2024-01-04"]
        );
        assert_eq!(series.last_close(), 9.25);
    }
}
