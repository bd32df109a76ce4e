//! PriceSeries — a validated, immutable sequence of daily bars.
//!
//! Construction enforces the series contract once, so the rest of the
//! pipeline never re-checks ordering or finiteness:
//! - dates strictly increasing (duplicates rejected)
//! - all OHLC fields finite
//! - every bar carries the same symbol

use crate::domain::Bar;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when constructing a [`PriceSeries`].
#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("empty price series")]
    Empty,

    #[error("bar {index} ({date}) is not after the previous bar ({prev_date})")]
    OutOfOrder {
        index: usize,
        date: chrono::NaiveDate,
        prev_date: chrono::NaiveDate,
    },

    #[error("bar {index} ({date}) has a non-finite price field")]
    NonFinite {
        index: usize,
        date: chrono::NaiveDate,
    },

    #[error("bar {index} has symbol '{got}', expected '{expected}'")]
    MixedSymbols {
        index: usize,
        got: String,
        expected: String,
    },
}

/// Ordered, validated OHLCV history for one symbol.
#[derive(Debug, Clone, Serialize)]
pub struct PriceSeries {
    bars: Vec<Bar>,
}

impl PriceSeries {
    /// Validate and wrap a bar sequence.
    pub fn new(bars: Vec<Bar>) -> Result<Self, SeriesError> {
        let first = bars.first().ok_or(SeriesError::Empty)?;
        let symbol = first.symbol.clone();

        for (index, bar) in bars.iter().enumerate() {
            if bar.symbol != symbol {
                return Err(SeriesError::MixedSymbols {
                    index,
                    got: bar.symbol.clone(),
                    expected: symbol.clone(),
                });
            }
            if bar.has_non_finite() {
                return Err(SeriesError::NonFinite {
                    index,
                    date: bar.date,
                });
            }
            if index > 0 {
                let prev = &bars[index - 1];
                if bar.date <= prev.date {
                    return Err(SeriesError::OutOfOrder {
                        index,
                        date: bar.date,
                        prev_date: prev.date,
                    });
                }
            }
        }

        Ok(Self { bars })
    }

    pub fn symbol(&self) -> &str {
        &self.bars[0].symbol
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always false: construction rejects empty series.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last(&self) -> &Bar {
        &self.bars[self.bars.len() - 1]
    }
}

impl<'de> Deserialize<'de> for PriceSeries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bars = Vec::<Bar>::deserialize(deserializer)?;
        PriceSeries::new(bars).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bar(day: u32, close: f64) -> Bar {
        Bar {
            symbol: "TEST".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1_000,
        }
    }

    #[test]
    fn accepts_ordered_bars() {
        let series = PriceSeries::new(vec![bar(2, 100.0), bar(3, 101.0), bar(4, 102.0)]).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.symbol(), "TEST");
        assert_eq!(series.last().close, 102.0);
    }

    #[test]
    fn rejects_empty() {
        assert!(matches!(PriceSeries::new(vec![]), Err(SeriesError::Empty)));
    }

    #[test]
    fn rejects_duplicate_dates() {
        let err = PriceSeries::new(vec![bar(2, 100.0), bar(2, 101.0)]).unwrap_err();
        assert!(matches!(err, SeriesError::OutOfOrder { index: 1, .. }));
    }

    #[test]
    fn rejects_backwards_dates() {
        let err = PriceSeries::new(vec![bar(3, 100.0), bar(2, 101.0)]).unwrap_err();
        assert!(matches!(err, SeriesError::OutOfOrder { .. }));
    }

    #[test]
    fn rejects_nan_close() {
        let mut bad = bar(3, 101.0);
        bad.close = f64::NAN;
        let err = PriceSeries::new(vec![bar(2, 100.0), bad]).unwrap_err();
        assert!(matches!(err, SeriesError::NonFinite { index: 1, .. }));
    }

    #[test]
    fn rejects_mixed_symbols() {
        let mut other = bar(3, 101.0);
        other.symbol = "OTHER".into();
        let err = PriceSeries::new(vec![bar(2, 100.0), other]).unwrap_err();
        assert!(matches!(err, SeriesError::MixedSymbols { .. }));
    }
}
