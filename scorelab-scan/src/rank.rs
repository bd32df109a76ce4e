//! Score ranking with letter grades.
//!
//! Successful records sort by confluence score descending (symbol as the
//! tie-break so output is stable), each graded A/B/C against the same
//! cutoffs that drive the confidence tiers.

use serde::{Deserialize, Serialize};

use scorelab_core::analyze::DecisionRecord;
use scorelab_core::config::ScoringConfig;
use scorelab_core::scoring::{Confidence, Decision};

/// Letter grade for a scanned symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
}

/// Grade a confluence score against the scoring cutoffs.
pub fn grade_for(score: i32, cfg: &ScoringConfig) -> Grade {
    if score >= cfg.high_cutoff {
        Grade::A
    } else if score >= cfg.mid_cutoff {
        Grade::B
    } else {
        Grade::C
    }
}

/// One row of the ranked scan output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSymbol {
    pub symbol: String,
    pub score: i32,
    pub grade: Grade,
    pub confidence: Confidence,
    pub decision: Decision,
    pub price: f64,
    pub probability: f64,
}

/// Rank records by score descending, grading each.
pub fn rank_records(records: &[DecisionRecord], cfg: &ScoringConfig) -> Vec<RankedSymbol> {
    let mut ranked: Vec<RankedSymbol> = records
        .iter()
        .map(|r| RankedSymbol {
            symbol: r.symbol.clone(),
            score: r.score,
            grade: grade_for(r.score, cfg),
            confidence: r.confidence,
            decision: r.decision,
            price: r.price,
            probability: r.probability,
        })
        .collect();

    ranked.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.symbol.cmp(&b.symbol)));
    ranked
}
