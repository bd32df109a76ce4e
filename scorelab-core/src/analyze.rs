//! The single analysis entry point.
//!
//! `analyze` runs the full pipeline over one validated price series:
//! indicators -> eligibility -> probability -> confluence score ->
//! decision -> risk plan, and returns everything in one serializable
//! record. Pure per call; the only cross-call state is the optional model
//! cache threaded through `analyze_cached`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::AnalyzeConfig;
use crate::domain::PriceSeries;
use crate::eligibility::{self, EligibilityReport};
use crate::error::AnalysisError;
use crate::model::{self, ModelCache, ModelScore, ModelStatus};
use crate::risk::{self, RiskPlan};
use crate::scoring::{self, Confidence, Decision, RuleHit, TrendBias};
use crate::snapshot::{compute_indicators, IndicatorSnapshot};

/// Everything a caller needs from one scoring call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub symbol: String,
    pub as_of: NaiveDate,
    pub price: f64,
    pub snapshot: IndicatorSnapshot,
    pub score: i32,
    pub rule_hits: Vec<RuleHit>,
    pub confidence: Confidence,
    pub decision: Decision,
    pub trend_bias: TrendBias,
    pub probability: f64,
    pub model_status: ModelStatus,
    pub risk: RiskPlan,
    /// `None` when the eligibility filter is disabled in the config.
    pub eligibility: Option<EligibilityReport>,
}

/// Analyze one symbol's history, training the probability model in place.
pub fn analyze(series: &PriceSeries, cfg: &AnalyzeConfig) -> Result<DecisionRecord, AnalysisError> {
    run(series, cfg, |snapshots| {
        model::train_and_score(snapshots, &cfg.model)
    })
}

/// Analyze with a shared per-symbol model cache. The cached model is reused
/// while the model configuration fingerprint matches and retrained
/// otherwise.
pub fn analyze_cached(
    series: &PriceSeries,
    cfg: &AnalyzeConfig,
    cache: &ModelCache,
) -> Result<DecisionRecord, AnalysisError> {
    let fingerprint = cfg.model_fingerprint();
    run(series, cfg, |snapshots| {
        cache.score(series.symbol(), &fingerprint, snapshots, &cfg.model)
    })
}

fn run<F>(
    series: &PriceSeries,
    cfg: &AnalyzeConfig,
    score_model: F,
) -> Result<DecisionRecord, AnalysisError>
where
    F: FnOnce(&[IndicatorSnapshot]) -> ModelScore,
{
    cfg.validate()?;

    let snapshots = compute_indicators(series, &cfg.indicators)?;
    let last = snapshots
        .last()
        .cloned()
        .ok_or(AnalysisError::InsufficientData {
            what: "indicator warm-up",
            required: cfg.indicators.min_bars,
            actual: 0,
        })?;
    let price = last.close;

    let eligibility = match &cfg.eligibility {
        Some(floors) => {
            let report = eligibility::check(&last, floors);
            if !report.eligible {
                return Err(AnalysisError::NotTradeable {
                    reasons: report.reasons,
                });
            }
            Some(report)
        }
        None => None,
    };

    let model_score = score_model(&snapshots);

    let buy = risk::buy_zone(last.support, last.ma_fast, &cfg.zones);
    let sell = risk::sell_zone(last.resistance, &cfg.zones);
    let breakdown = scoring::score_and_decide(&last, &buy, model_score.probability, &cfg.scoring);

    let stop_loss = risk::structure_stop(last.support, series.bars(), cfg.risk.stop_lookback);
    let plan = risk::size_position(price, stop_loss, buy, sell, &cfg.risk);

    Ok(DecisionRecord {
        symbol: series.symbol().to_string(),
        as_of: last.date,
        price,
        snapshot: last,
        score: breakdown.score,
        rule_hits: breakdown.hits,
        confidence: breakdown.confidence,
        decision: breakdown.decision,
        trend_bias: breakdown.trend_bias,
        probability: model_score.probability,
        model_status: model_score.status,
        risk: plan,
        eligibility,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Bar;
    use chrono::NaiveDate;

    fn series(closes: &[f64], volume: u64) -> PriceSeries {
        let base_date = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                symbol: "TEST".into(),
                date: base_date + chrono::Duration::days(i as i64),
                open: close - 0.5,
                high: close + 2.0,
                low: close - 2.0,
                close,
                volume,
            })
            .collect();
        PriceSeries::new(bars).unwrap()
    }

    fn rising(n: usize) -> Vec<f64> {
        (0..n).map(|i| 100.0 + i as f64 * 0.5).collect()
    }

    #[test]
    fn ten_bars_is_insufficient() {
        let s = series(&rising(10), 6_000_000);
        let err = analyze(&s, &AnalyzeConfig::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::InsufficientData { .. }));
    }

    #[test]
    fn thin_symbol_is_not_tradeable() {
        let s = series(&rising(300), 1_000);
        let err = analyze(&s, &AnalyzeConfig::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::NotTradeable { .. }));
    }

    #[test]
    fn disabled_filter_skips_eligibility() {
        let s = series(&rising(300), 1_000);
        let cfg = AnalyzeConfig {
            eligibility: None,
            ..AnalyzeConfig::default()
        };
        let record = analyze(&s, &cfg).unwrap();
        assert!(record.eligibility.is_none());
    }

    #[test]
    fn record_carries_last_bar_state() {
        let s = series(&rising(300), 6_000_000);
        let record = analyze(&s, &AnalyzeConfig::default()).unwrap();
        assert_eq!(record.symbol, "TEST");
        assert_eq!(record.as_of, s.last().date);
        assert_eq!(record.price, s.last().close);
        assert_eq!(record.trend_bias, TrendBias::Bullish);
    }

    #[test]
    fn record_serializes_to_json() {
        let s = series(&rising(300), 6_000_000);
        let record = analyze(&s, &AnalyzeConfig::default()).unwrap();
        let json = serde_json::to_string(&record).unwrap();
        let back: DecisionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
