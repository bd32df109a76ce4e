//! Synthetic bar generation for demos and tests.
//!
//! Produces a seeded random walk with drift: clearly fake data, tagged by
//! the caller's command (the CLI `demo` subcommand), never a silent
//! substitute for real bars.

use chrono::{Datelike, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use scorelab_core::domain::{Bar, PriceSeries};

/// Parameters of the random walk.
#[derive(Debug, Clone)]
pub struct SyntheticSpec {
    /// Trading days to generate.
    pub days: usize,
    /// First close.
    pub start_price: f64,
    /// Mean daily return (e.g. 0.0008 for a ~20% annual drift).
    pub drift: f64,
    /// Daily return half-range (e.g. 0.012).
    pub volatility: f64,
    /// Mean daily volume.
    pub volume: u64,
    /// RNG seed; the same seed always produces the same series.
    pub seed: u64,
    /// Calendar date of the first bar.
    pub start_date: NaiveDate,
}

impl Default for SyntheticSpec {
    fn default() -> Self {
        Self {
            days: 300,
            start_price: 100.0,
            drift: 0.0005,
            volatility: 0.012,
            volume: 6_000_000,
            seed: 42,
            start_date: NaiveDate::from_ymd_opt(2023, 1, 2).expect("valid date"),
        }
    }
}

/// Generate a seeded random-walk series, skipping weekends.
pub fn random_walk_series(symbol: &str, spec: &SyntheticSpec) -> PriceSeries {
    let mut rng = StdRng::seed_from_u64(spec.seed);

    let mut bars = Vec::with_capacity(spec.days);
    let mut price = spec.start_price;
    let mut date = spec.start_date;

    while bars.len() < spec.days {
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            date += chrono::Duration::days(1);
            continue;
        }

        let daily_return = spec.drift + rng.gen_range(-spec.volatility..spec.volatility);
        let open = price;
        let close = (price * (1.0 + daily_return)).max(0.01);
        let high = open.max(close) * (1.0 + rng.gen_range(0.002..0.015));
        let low = (open.min(close) * (1.0 - rng.gen_range(0.002..0.015))).max(0.01);
        let volume = rng.gen_range(spec.volume / 2..spec.volume * 2);

        bars.push(Bar {
            symbol: symbol.to_string(),
            date,
            open,
            high,
            low,
            close,
            volume,
        });

        price = close;
        date += chrono::Duration::days(1);
    }

    PriceSeries::new(bars).expect("synthetic bars are ordered and finite")
}
