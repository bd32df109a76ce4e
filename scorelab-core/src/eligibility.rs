//! Market eligibility filter.
//!
//! Cheap pre-trade gates evaluated before any scoring: a symbol that is too
//! illiquid or too quiet to trade cleanly is blocked outright. Failure is
//! terminal for the call (`AnalysisError::NotTradeable`), carrying one
//! reason per failed floor so the caller can show all of them at once.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::EligibilityConfig;
use crate::snapshot::IndicatorSnapshot;

/// Why a symbol was blocked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockReason {
    LowLiquidity { avg_volume: f64, floor: f64 },
    LowVolatility { atr_ratio: f64, floor: f64 },
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockReason::LowLiquidity { avg_volume, floor } => {
                write!(f, "low liquidity: avg volume {avg_volume:.0} below floor {floor:.0}")
            }
            BlockReason::LowVolatility { atr_ratio, floor } => {
                write!(
                    f,
                    "low volatility: ATR/price {atr_ratio:.4} below floor {floor:.4}"
                )
            }
        }
    }
}

/// Outcome of the eligibility check, kept in the decision record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityReport {
    pub eligible: bool,
    pub reasons: Vec<BlockReason>,
}

/// Evaluate the liquidity and volatility floors against the latest snapshot.
pub fn check(snapshot: &IndicatorSnapshot, cfg: &EligibilityConfig) -> EligibilityReport {
    let mut reasons = Vec::new();

    if snapshot.avg_volume < cfg.min_avg_volume {
        reasons.push(BlockReason::LowLiquidity {
            avg_volume: snapshot.avg_volume,
            floor: cfg.min_avg_volume,
        });
    }

    let atr_ratio = snapshot.atr / snapshot.close;
    if atr_ratio < cfg.min_atr_ratio {
        reasons.push(BlockReason::LowVolatility {
            atr_ratio,
            floor: cfg.min_atr_ratio,
        });
    }

    EligibilityReport {
        eligible: reasons.is_empty(),
        reasons,
    }
}
