//! Risk and position sizing.
//!
//! The stop is structure-based: rolling support, optionally tightened by
//! the lowest low of the last few bars — never user-supplied. Sizing risks
//! a fixed percent of capital per trade; reward/risk measures the distance
//! to the sell zone floor and is clamped at zero.

use serde::{Deserialize, Serialize};

use crate::config::{RiskConfig, ZoneConfig};
use crate::domain::Bar;

/// Guard against division by ~zero when the price sits on the stop.
const RISK_EPSILON: f64 = 1e-9;

/// Inclusive price band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub low: f64,
    pub high: f64,
}

impl Zone {
    pub fn contains(&self, price: f64) -> bool {
        self.low <= price && price <= self.high
    }
}

/// Sizing and exit guidance for one decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskPlan {
    pub stop_loss: f64,
    pub risk_amount: f64,
    pub risk_per_share: f64,
    pub max_units: u64,
    pub max_lots: u64,
    pub reward_risk_ratio: f64,
    pub buy_zone: Zone,
    pub sell_zone: Zone,
}

/// Accumulation band: discounted support up to the fast moving average.
pub fn buy_zone(support: f64, ma_fast: f64, cfg: &ZoneConfig) -> Zone {
    Zone {
        low: support * cfg.buy_support_factor,
        high: ma_fast,
    }
}

/// Distribution band around rolling resistance.
pub fn sell_zone(resistance: f64, cfg: &ZoneConfig) -> Zone {
    Zone {
        low: resistance * cfg.sell_lower_factor,
        high: resistance * cfg.sell_upper_factor,
    }
}

/// Structure-based stop: rolling support, tightened by the lowest low of
/// the last `lookback` bars when that sits lower.
pub fn structure_stop(support: f64, bars: &[Bar], lookback: usize) -> f64 {
    let tail_low = bars
        .iter()
        .rev()
        .take(lookback.max(1))
        .map(|b| b.low)
        .fold(f64::INFINITY, f64::min);
    support.min(tail_low)
}

/// Size a position off the price, the derived stop, and the capital/risk
/// parameters. A price at or below the stop sizes to zero — never a
/// division error, never a negative reward/risk.
pub fn size_position(
    price: f64,
    stop_loss: f64,
    buy: Zone,
    sell: Zone,
    cfg: &RiskConfig,
) -> RiskPlan {
    let risk_amount = cfg.capital * cfg.risk_pct / 100.0;
    let risk_per_share = (price - stop_loss).max(RISK_EPSILON);

    let max_units = if price - stop_loss <= RISK_EPSILON {
        0
    } else {
        (risk_amount / risk_per_share).floor() as u64
    };
    let max_lots = max_units / cfg.lot_size;

    let target = sell.low;
    let reward_risk_ratio = if target > price && max_units > 0 {
        (target - price) / risk_per_share
    } else {
        0.0
    };

    RiskPlan {
        stop_loss,
        risk_amount,
        risk_per_share,
        max_units,
        max_lots,
        reward_risk_ratio,
        buy_zone: buy,
        sell_zone: sell,
    }
}
