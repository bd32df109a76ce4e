//! Per-bar indicator snapshots.
//!
//! All indicators are computed once over the full series, then the common
//! warm-up prefix (the longest lookback among them) is trimmed so every
//! emitted row is fully populated — no forward-fill, no zero-fill, no NaN.
//! A series too short to produce at least one full row is an
//! `InsufficientData` failure, never a partial snapshot.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::IndicatorConfig;
use crate::domain::PriceSeries;
use crate::error::AnalysisError;
use crate::indicators::{
    Indicator, Macd, RangeAtr, RollingMax, RollingMin, RollingVolume, Rsi, Sma,
};

/// Derived values for one bar, aligned 1:1 with the series tail after the
/// warm-up trim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub date: NaiveDate,
    pub close: f64,
    pub ma_fast: f64,
    pub ma_slow: f64,
    pub ma_trend: f64,
    pub rsi: f64,
    pub macd: f64,
    pub macd_signal: f64,
    pub support: f64,
    pub resistance: f64,
    pub avg_volume: f64,
    pub atr: f64,
}

/// Select the trend window from the available history length: 200 bars of
/// trend context when we have them, degrading to 100, 50, or the full
/// length for recently listed instruments. Avoids an all-missing trend
/// column on short histories.
pub fn adaptive_trend_window(len: usize) -> usize {
    if len >= 200 {
        200
    } else if len >= 100 {
        100
    } else if len >= 50 {
        50
    } else {
        len
    }
}

/// Compute the full snapshot sequence for a series.
pub fn compute_indicators(
    series: &PriceSeries,
    cfg: &IndicatorConfig,
) -> Result<Vec<IndicatorSnapshot>, AnalysisError> {
    let bars = series.bars();
    let n = bars.len();

    if n < cfg.min_bars {
        return Err(AnalysisError::InsufficientData {
            what: "price history",
            required: cfg.min_bars,
            actual: n,
        });
    }

    let trend_window = cfg.trend_window.unwrap_or_else(|| adaptive_trend_window(n));
    if trend_window == 0 {
        return Err(AnalysisError::DegenerateInput(
            "trend window must be >= 1".into(),
        ));
    }

    let ma_fast = Sma::new(cfg.fast_window);
    let ma_slow = Sma::new(cfg.slow_window);
    let ma_trend = Sma::new(trend_window);
    let rsi = Rsi::new(cfg.rsi_period);
    let support = RollingMin::new(cfg.sr_window);
    let resistance = RollingMax::new(cfg.sr_window);
    let avg_volume = RollingVolume::new(cfg.volume_window);
    let atr = RangeAtr::new(cfg.atr_window);
    let macd = Macd::new(cfg.macd_fast, cfg.macd_slow, cfg.macd_signal);

    let warmup = [
        ma_fast.lookback(),
        ma_slow.lookback(),
        ma_trend.lookback(),
        rsi.lookback(),
        support.lookback(),
        resistance.lookback(),
        avg_volume.lookback(),
        atr.lookback(),
        macd.lookback(),
    ]
    .into_iter()
    .max()
    .unwrap_or(0);

    if warmup >= n {
        return Err(AnalysisError::InsufficientData {
            what: "indicator warm-up",
            required: warmup + 1,
            actual: n,
        });
    }

    let ma_fast = ma_fast.compute(bars);
    let ma_slow = ma_slow.compute(bars);
    let ma_trend = ma_trend.compute(bars);
    let rsi = rsi.compute(bars);
    let support = support.compute(bars);
    let resistance = resistance.compute(bars);
    let avg_volume = avg_volume.compute(bars);
    let atr = atr.compute(bars);
    let macd_lines = macd.compute(bars);

    let snapshots: Vec<IndicatorSnapshot> = (warmup..n)
        .map(|i| IndicatorSnapshot {
            date: bars[i].date,
            close: bars[i].close,
            ma_fast: ma_fast[i],
            ma_slow: ma_slow[i],
            ma_trend: ma_trend[i],
            rsi: rsi[i],
            macd: macd_lines.macd[i],
            macd_signal: macd_lines.signal[i],
            support: support[i],
            resistance: resistance[i],
            avg_volume: avg_volume[i],
            atr: atr[i],
        })
        .collect();

    debug_assert!(snapshots.iter().all(|s| {
        s.ma_fast.is_finite()
            && s.ma_slow.is_finite()
            && s.ma_trend.is_finite()
            && s.rsi.is_finite()
            && s.macd.is_finite()
            && s.macd_signal.is_finite()
            && s.support.is_finite()
            && s.resistance.is_finite()
            && s.avg_volume.is_finite()
            && s.atr.is_finite()
    }));

    Ok(snapshots)
}
