//! Rolling window statistics over bar fields.
//!
//! - `RollingMin` / `RollingMax`: lowest low / highest high over the window
//!   (support and resistance).
//! - `RollingVolume`: mean volume over the window (liquidity input).
//! - `RangeAtr`: mean of (high - low) over the window — the bar-range ATR
//!   proxy used by the volatility floor and the snapshot.
//!
//! Lookback for all: period - 1.

use crate::domain::Bar;
use crate::indicators::Indicator;

#[derive(Debug, Clone)]
pub struct RollingMin {
    period: usize,
    name: String,
}

impl RollingMin {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "rolling window must be >= 1");
        Self {
            period,
            name: format!("rolling_min_{period}"),
        }
    }
}

impl Indicator for RollingMin {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];
        if n < self.period {
            return result;
        }
        for i in (self.period - 1)..n {
            result[i] = bars[i + 1 - self.period..=i]
                .iter()
                .map(|b| b.low)
                .fold(f64::INFINITY, f64::min);
        }
        result
    }
}

#[derive(Debug, Clone)]
pub struct RollingMax {
    period: usize,
    name: String,
}

impl RollingMax {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "rolling window must be >= 1");
        Self {
            period,
            name: format!("rolling_max_{period}"),
        }
    }
}

impl Indicator for RollingMax {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];
        if n < self.period {
            return result;
        }
        for i in (self.period - 1)..n {
            result[i] = bars[i + 1 - self.period..=i]
                .iter()
                .map(|b| b.high)
                .fold(f64::NEG_INFINITY, f64::max);
        }
        result
    }
}

#[derive(Debug, Clone)]
pub struct RollingVolume {
    period: usize,
    name: String,
}

impl RollingVolume {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "rolling window must be >= 1");
        Self {
            period,
            name: format!("avg_volume_{period}"),
        }
    }
}

impl Indicator for RollingVolume {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];
        if n < self.period {
            return result;
        }
        let mut sum: f64 = bars.iter().take(self.period).map(|b| b.volume as f64).sum();
        result[self.period - 1] = sum / self.period as f64;
        for i in self.period..n {
            sum += bars[i].volume as f64 - bars[i - self.period].volume as f64;
            result[i] = sum / self.period as f64;
        }
        result
    }
}

#[derive(Debug, Clone)]
pub struct RangeAtr {
    period: usize,
    name: String,
}

impl RangeAtr {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "rolling window must be >= 1");
        Self {
            period,
            name: format!("atr_{period}"),
        }
    }
}

impl Indicator for RangeAtr {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];
        if n < self.period {
            return result;
        }
        let mut sum: f64 = bars.iter().take(self.period).map(|b| b.high - b.low).sum();
        result[self.period - 1] = sum / self.period as f64;
        for i in self.period..n {
            sum += (bars[i].high - bars[i].low) - (bars[i - self.period].high - bars[i - self.period].low);
            result[i] = sum / self.period as f64;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};
    use chrono::NaiveDate;

    fn make_ohlc_bars(data: &[(f64, f64, f64, f64, u64)]) -> Vec<Bar> {
        let base_date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        data.iter()
            .enumerate()
            .map(|(i, &(open, high, low, close, volume))| Bar {
                symbol: "TEST".to_string(),
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high,
                low,
                close,
                volume,
            })
            .collect()
    }

    #[test]
    fn rolling_min_tracks_lowest_low() {
        let bars = make_ohlc_bars(&[
            (100.0, 105.0, 95.0, 102.0, 1000),
            (102.0, 108.0, 99.0, 106.0, 1000),
            (106.0, 107.0, 98.0, 99.0, 1000),
            (99.0, 103.0, 97.0, 101.0, 1000),
        ]);
        let result = RollingMin::new(3).compute(&bars);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert_approx(result[2], 95.0, DEFAULT_EPSILON);
        assert_approx(result[3], 97.0, DEFAULT_EPSILON);
    }

    #[test]
    fn rolling_max_tracks_highest_high() {
        let bars = make_ohlc_bars(&[
            (100.0, 105.0, 95.0, 102.0, 1000),
            (102.0, 108.0, 99.0, 106.0, 1000),
            (106.0, 107.0, 98.0, 99.0, 1000),
            (99.0, 103.0, 97.0, 101.0, 1000),
        ]);
        let result = RollingMax::new(3).compute(&bars);
        assert_approx(result[2], 108.0, DEFAULT_EPSILON);
        assert_approx(result[3], 108.0, DEFAULT_EPSILON);
    }

    #[test]
    fn rolling_volume_is_window_mean() {
        let bars = make_ohlc_bars(&[
            (1.0, 2.0, 0.5, 1.5, 100),
            (1.0, 2.0, 0.5, 1.5, 200),
            (1.0, 2.0, 0.5, 1.5, 300),
            (1.0, 2.0, 0.5, 1.5, 400),
        ]);
        let result = RollingVolume::new(2).compute(&bars);
        assert!(result[0].is_nan());
        assert_approx(result[1], 150.0, DEFAULT_EPSILON);
        assert_approx(result[2], 250.0, DEFAULT_EPSILON);
        assert_approx(result[3], 350.0, DEFAULT_EPSILON);
    }

    #[test]
    fn range_atr_is_mean_bar_range() {
        let bars = make_ohlc_bars(&[
            (100.0, 105.0, 95.0, 102.0, 1000), // range 10
            (102.0, 108.0, 100.0, 106.0, 1000), // range 8
            (106.0, 107.0, 98.0, 99.0, 1000),  // range 9
        ]);
        let result = RangeAtr::new(2).compute(&bars);
        assert!(result[0].is_nan());
        assert_approx(result[1], 9.0, DEFAULT_EPSILON);
        assert_approx(result[2], 8.5, DEFAULT_EPSILON);
    }

    #[test]
    fn lookbacks() {
        assert_eq!(RollingMin::new(20).lookback(), 19);
        assert_eq!(RollingMax::new(20).lookback(), 19);
        assert_eq!(RollingVolume::new(20).lookback(), 19);
        assert_eq!(RangeAtr::new(14).lookback(), 13);
    }
}
