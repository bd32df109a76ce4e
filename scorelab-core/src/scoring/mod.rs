//! Confluence scoring and the decision mapping.
//!
//! The score is a plain tally of independent rule contributions over the
//! most recent bar. Confidence tiers come from configurable cutoffs, and
//! the decision is a pure function of (score, confidence, trend bias).
//!
//! Ordering invariant: LOW confidence always maps to NO_TRADE, before any
//! directional mapping runs. A low-confidence BUY cannot be emitted under
//! any threshold configuration.

pub mod rules;

pub use rules::{evaluate_rules, Rule, RuleHit};

use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::risk::Zone;
use crate::snapshot::IndicatorSnapshot;

/// Confidence tier derived from the confluence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// Discrete trading decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Buy,
    Sell,
    Wait,
    Hold,
    NoTrade,
}

/// Position of the close relative to the long-horizon trend average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrendBias {
    Bullish,
    Bearish,
}

/// Full scoring outcome for the latest bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub score: i32,
    pub hits: Vec<RuleHit>,
    pub confidence: Confidence,
    pub decision: Decision,
    pub trend_bias: TrendBias,
}

/// Map a score to its confidence tier.
pub fn confidence_for(score: i32, cfg: &ScoringConfig) -> Confidence {
    if score >= cfg.high_cutoff {
        Confidence::High
    } else if score >= cfg.mid_cutoff {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

/// Map (score, confidence, bias) to a decision.
///
/// The LOW -> NO_TRADE override runs first and is unconditional.
pub fn decide(score: i32, confidence: Confidence, bias: TrendBias, cfg: &ScoringConfig) -> Decision {
    match confidence {
        Confidence::Low => Decision::NoTrade,
        _ if score <= cfg.sell_cutoff => Decision::Sell,
        Confidence::High => Decision::Buy,
        Confidence::Medium => match bias {
            TrendBias::Bullish => Decision::Wait,
            TrendBias::Bearish => Decision::Hold,
        },
    }
}

/// Score the latest bar and map it to a decision.
pub fn score_and_decide(
    snap: &IndicatorSnapshot,
    buy: &Zone,
    probability: f64,
    cfg: &ScoringConfig,
) -> ScoreBreakdown {
    let hits = evaluate_rules(snap, buy, probability, cfg);
    let score: i32 = hits.iter().map(|h| h.delta).sum();
    let confidence = confidence_for(score, cfg);
    let trend_bias = if snap.close > snap.ma_trend {
        TrendBias::Bullish
    } else {
        TrendBias::Bearish
    };
    let decision = decide(score, confidence, trend_bias, cfg);

    ScoreBreakdown {
        score,
        hits,
        confidence,
        decision,
        trend_bias,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn cfg() -> ScoringConfig {
        ScoringConfig::default()
    }

    fn snap(close: f64) -> IndicatorSnapshot {
        IndicatorSnapshot {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            close,
            ma_fast: 103.0,
            ma_slow: 101.0,
            ma_trend: 100.0,
            rsi: 55.0,
            macd: 0.8,
            macd_signal: 0.5,
            support: 98.0,
            resistance: 115.0,
            avg_volume: 6_000_000.0,
            atr: 2.0,
        }
    }

    #[test]
    fn confidence_tiers() {
        let c = cfg();
        assert_eq!(confidence_for(6, &c), Confidence::High);
        assert_eq!(confidence_for(5, &c), Confidence::High);
        assert_eq!(confidence_for(4, &c), Confidence::Medium);
        assert_eq!(confidence_for(3, &c), Confidence::Medium);
        assert_eq!(confidence_for(2, &c), Confidence::Low);
        assert_eq!(confidence_for(-2, &c), Confidence::Low);
    }

    #[test]
    fn low_confidence_forces_no_trade() {
        let c = cfg();
        for score in -2..3 {
            assert_eq!(
                decide(score, Confidence::Low, TrendBias::Bullish, &c),
                Decision::NoTrade
            );
            assert_eq!(
                decide(score, Confidence::Low, TrendBias::Bearish, &c),
                Decision::NoTrade
            );
        }
    }

    #[test]
    fn high_confidence_maps_to_buy() {
        assert_eq!(
            decide(5, Confidence::High, TrendBias::Bullish, &cfg()),
            Decision::Buy
        );
    }

    #[test]
    fn medium_confidence_waits_or_holds_by_bias() {
        let c = cfg();
        assert_eq!(
            decide(3, Confidence::Medium, TrendBias::Bullish, &c),
            Decision::Wait
        );
        assert_eq!(
            decide(3, Confidence::Medium, TrendBias::Bearish, &c),
            Decision::Hold
        );
    }

    #[test]
    fn sell_cutoff_fires_only_above_low_confidence() {
        // Custom thresholds where a deeply negative score still clears the
        // MEDIUM tier — only then can SELL fire.
        let c = ScoringConfig {
            mid_cutoff: -5,
            high_cutoff: 5,
            sell_cutoff: -2,
            ..ScoringConfig::default()
        };
        assert_eq!(
            decide(-3, confidence_for(-3, &c), TrendBias::Bearish, &c),
            Decision::Sell
        );
        // With default tiers, the same score is LOW and becomes NO_TRADE.
        let d = cfg();
        assert_eq!(
            decide(-3, confidence_for(-3, &d), TrendBias::Bearish, &d),
            Decision::NoTrade
        );
    }

    #[test]
    fn full_confluence_scores_buy() {
        // close 104: above fast MA (103), above trend (100), inside the
        // buy zone, MACD above signal, RSI in band, bullish probability.
        let s = snap(104.0);
        let buy = Zone { low: 99.96, high: 104.5 };
        let breakdown = score_and_decide(&s, &buy, 0.7, &cfg());
        assert_eq!(breakdown.score, 6);
        assert_eq!(breakdown.confidence, Confidence::High);
        assert_eq!(breakdown.decision, Decision::Buy);
        assert_eq!(breakdown.trend_bias, TrendBias::Bullish);
    }

    #[test]
    fn neutral_probability_leaves_score_unchanged() {
        let s = snap(104.0);
        let buy = Zone { low: 99.96, high: 104.5 };
        let with_neutral = score_and_decide(&s, &buy, 0.5, &cfg());
        let hits_without_prob: i32 = evaluate_rules(&s, &buy, 0.5, &cfg())
            .iter()
            .filter(|h| !matches!(h.rule, Rule::ProbBullish | Rule::ProbBearish))
            .map(|h| h.delta)
            .sum();
        assert_eq!(with_neutral.score, hits_without_prob);
    }
}
