//! Moving Average Convergence Divergence (MACD).
//!
//! MACD line = EMA(fast) - EMA(slow) of close; signal = EMA(signal) of the
//! MACD line. The EMAs are recursive and seeded from the first available
//! value, so both lines are defined from bar 0 (lookback 0). Early values
//! carry seed bias that decays as the recursion converges; the snapshot
//! layer's warm-up trim (driven by the slower indicators) discards them in
//! practice.

use crate::domain::Bar;

/// Recursive EMA over a raw series, seeded from the first value.
/// alpha = 2 / (period + 1).
pub fn ema_seeded_first(values: &[f64], period: usize) -> Vec<f64> {
    assert!(period >= 1, "EMA period must be >= 1");
    let mut result = Vec::with_capacity(values.len());
    let alpha = 2.0 / (period as f64 + 1.0);

    let mut prev = match values.first() {
        Some(&v) => v,
        None => return result,
    };
    result.push(prev);

    for &v in &values[1..] {
        prev = alpha * v + (1.0 - alpha) * prev;
        result.push(prev);
    }

    result
}

/// Both MACD output series, aligned with the input bars.
#[derive(Debug, Clone)]
pub struct MacdLines {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
}

impl Macd {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast >= 1 && slow >= 1 && signal >= 1, "MACD periods must be >= 1");
        assert!(fast < slow, "MACD fast period must be shorter than slow");
        Self { fast, slow, signal }
    }

    pub fn lookback(&self) -> usize {
        0
    }

    pub fn compute(&self, bars: &[Bar]) -> MacdLines {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let ema_fast = ema_seeded_first(&closes, self.fast);
        let ema_slow = ema_seeded_first(&closes, self.slow);

        let macd: Vec<f64> = ema_fast
            .iter()
            .zip(ema_slow.iter())
            .map(|(f, s)| f - s)
            .collect();
        let signal = ema_seeded_first(&macd, self.signal);

        MacdLines { macd, signal }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn ema_period_1_equals_input() {
        let result = ema_seeded_first(&[100.0, 200.0, 300.0], 1);
        assert_approx(result[0], 100.0, DEFAULT_EPSILON);
        assert_approx(result[1], 200.0, DEFAULT_EPSILON);
        assert_approx(result[2], 300.0, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_3_known_values() {
        // alpha = 0.5; seed = 10
        // EMA[1] = 0.5*11 + 0.5*10 = 10.5
        // EMA[2] = 0.5*12 + 0.5*10.5 = 11.25
        let result = ema_seeded_first(&[10.0, 11.0, 12.0], 3);
        assert_approx(result[0], 10.0, DEFAULT_EPSILON);
        assert_approx(result[1], 10.5, DEFAULT_EPSILON);
        assert_approx(result[2], 11.25, DEFAULT_EPSILON);
    }

    #[test]
    fn macd_constant_prices_is_zero() {
        let bars = make_bars(&[50.0; 40]);
        let lines = Macd::new(12, 26, 9).compute(&bars);
        for (m, s) in lines.macd.iter().zip(lines.signal.iter()) {
            assert_approx(*m, 0.0, DEFAULT_EPSILON);
            assert_approx(*s, 0.0, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn macd_rising_prices_turns_positive() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let bars = make_bars(&closes);
        let lines = Macd::new(12, 26, 9).compute(&bars);
        // Fast EMA tracks a rising series more closely than the slow EMA.
        let last = *lines.macd.last().unwrap();
        assert!(last > 0.0, "expected positive MACD, got {last}");
        assert!(last > *lines.signal.last().unwrap() - 1e-9);
    }

    #[test]
    fn macd_lines_are_full_length() {
        let bars = make_bars(&[10.0, 11.0, 12.0]);
        let lines = Macd::new(2, 3, 2).compute(&bars);
        assert_eq!(lines.macd.len(), 3);
        assert_eq!(lines.signal.len(), 3);
        assert!(lines.macd.iter().all(|v| v.is_finite()));
    }
}
