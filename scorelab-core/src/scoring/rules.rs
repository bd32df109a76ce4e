//! Confluence rule predicates.
//!
//! Each rule is an independent predicate over the latest snapshot, the buy
//! zone, or the model probability, contributing +1 or -1 when it fires.
//! Rules can be added or removed without touching their neighbors; the
//! scorer just sums whatever fires.

use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::risk::Zone;
use crate::snapshot::IndicatorSnapshot;

/// Identity of a fired rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rule {
    TrendBullish,
    AboveFastMa,
    MacdAboveSignal,
    RsiInBand,
    RsiOverbought,
    InBuyZone,
    ProbBullish,
    ProbBearish,
}

/// One fired rule and its score contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleHit {
    pub rule: Rule,
    pub delta: i32,
}

fn hit(rule: Rule, delta: i32) -> RuleHit {
    RuleHit { rule, delta }
}

/// Close above the long-horizon trend average.
pub fn trend_bullish(snap: &IndicatorSnapshot) -> Option<RuleHit> {
    (snap.close > snap.ma_trend).then(|| hit(Rule::TrendBullish, 1))
}

/// Close above the fast moving average.
pub fn above_fast_ma(snap: &IndicatorSnapshot) -> Option<RuleHit> {
    (snap.close > snap.ma_fast).then(|| hit(Rule::AboveFastMa, 1))
}

/// MACD line above its signal line.
pub fn macd_above_signal(snap: &IndicatorSnapshot) -> Option<RuleHit> {
    (snap.macd > snap.macd_signal)
        .then(|| hit(Rule::MacdAboveSignal, 1))
}

/// RSI strictly inside the constructive band.
pub fn rsi_in_band(snap: &IndicatorSnapshot, cfg: &ScoringConfig) -> Option<RuleHit> {
    (snap.rsi > cfg.rsi_band_low && snap.rsi < cfg.rsi_band_high)
        .then(|| hit(Rule::RsiInBand, 1))
}

/// RSI at or above the overbought threshold.
pub fn rsi_overbought(snap: &IndicatorSnapshot, cfg: &ScoringConfig) -> Option<RuleHit> {
    (snap.rsi >= cfg.rsi_overbought)
        .then(|| hit(Rule::RsiOverbought, -1))
}

/// Close inside the accumulation zone.
pub fn in_buy_zone(snap: &IndicatorSnapshot, buy: &Zone) -> Option<RuleHit> {
    buy.contains(snap.close).then(|| hit(Rule::InBuyZone, 1))
}

/// Model probability above the bullish threshold.
pub fn prob_bullish(probability: f64, cfg: &ScoringConfig) -> Option<RuleHit> {
    (probability > cfg.prob_high)
        .then(|| hit(Rule::ProbBullish, 1))
}

/// Model probability below the bearish threshold.
pub fn prob_bearish(probability: f64, cfg: &ScoringConfig) -> Option<RuleHit> {
    (probability < cfg.prob_low)
        .then(|| hit(Rule::ProbBearish, -1))
}

/// Run every rule against the latest bar and collect the hits.
pub fn evaluate_rules(
    snap: &IndicatorSnapshot,
    buy: &Zone,
    probability: f64,
    cfg: &ScoringConfig,
) -> Vec<RuleHit> {
    [
        trend_bullish(snap),
        above_fast_ma(snap),
        macd_above_signal(snap),
        rsi_in_band(snap, cfg),
        rsi_overbought(snap, cfg),
        in_buy_zone(snap, buy),
        prob_bullish(probability, cfg),
        prob_bearish(probability, cfg),
    ]
    .into_iter()
    .flatten()
    .collect()
}
