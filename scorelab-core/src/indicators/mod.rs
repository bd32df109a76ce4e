//! Concrete indicator implementations.
//!
//! Indicators are pure functions: bar history in, numeric series out. Each
//! output is the same length as the input with the first `lookback()` values
//! `f64::NAN` (warm-up). The snapshot layer trims the common warm-up prefix
//! once, so no NaN escapes the pipeline.
//!
//! Inputs come from a validated `PriceSeries` (all prices finite), so the
//! implementations do not re-check for NaN.
//!
//! # Look-ahead guard
//! No value at bar t may depend on price data from bar t+1 or later.

pub mod macd;
pub mod rolling;
pub mod rsi;
pub mod sma;

pub use macd::{Macd, MacdLines};
pub use rolling::{RangeAtr, RollingMax, RollingMin, RollingVolume};
pub use rsi::Rsi;
pub use sma::Sma;

use crate::domain::Bar;

/// Trait for single-series indicators.
pub trait Indicator {
    /// Human-readable name (e.g., "sma_20", "rsi_14").
    fn name(&self) -> &str;

    /// Number of bars consumed before the first valid output.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire bar series.
    ///
    /// Returns a `Vec<f64>` of the same length as `bars`, with the first
    /// `lookback()` values `f64::NAN`.
    fn compute(&self, bars: &[Bar]) -> Vec<f64>;
}

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLV: open = prev_close (or close for the first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<Bar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            let high = open.max(close) + 1.0;
            let low = open.min(close) - 1.0;
            Bar {
                symbol: "TEST".to_string(),
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high,
                low,
                close,
                volume: 1000,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
