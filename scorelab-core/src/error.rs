//! Structured error types for the analysis pipeline.
//!
//! Two of the three variants are terminal for a call: the core returns a
//! typed failure instead of a best-effort number. A probability model that
//! cannot train is deliberately NOT represented here — it falls back to a
//! neutral 0.5 and is reported via `ModelStatus` in the decision record.

use crate::domain::SeriesError;
use crate::eligibility::BlockReason;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The series is too short for a requested indicator or for the
    /// pipeline's minimum history floor.
    #[error("insufficient data for {what}: need {required} bars, got {actual}")]
    InsufficientData {
        what: &'static str,
        required: usize,
        actual: usize,
    },

    /// Inputs that make the computation meaningless (invalid windows,
    /// non-positive capital, malformed series).
    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    /// The symbol failed the market eligibility filter (liquidity or
    /// volatility floor). Terminal for this call.
    #[error("symbol not tradeable: {}", format_reasons(.reasons))]
    NotTradeable { reasons: Vec<BlockReason> },
}

fn format_reasons(reasons: &[BlockReason]) -> String {
    reasons
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<SeriesError> for AnalysisError {
    fn from(err: SeriesError) -> Self {
        AnalysisError::DegenerateInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_data_message_names_the_gap() {
        let err = AnalysisError::InsufficientData {
            what: "price history",
            required: 20,
            actual: 10,
        };
        let msg = err.to_string();
        assert!(msg.contains("price history"));
        assert!(msg.contains("20"));
        assert!(msg.contains("10"));
    }

    #[test]
    fn not_tradeable_lists_all_reasons() {
        let err = AnalysisError::NotTradeable {
            reasons: vec![
                BlockReason::LowLiquidity {
                    avg_volume: 1_000.0,
                    floor: 5_000_000.0,
                },
                BlockReason::LowVolatility {
                    atr_ratio: 0.001,
                    floor: 0.01,
                },
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("liquidity"));
        assert!(msg.contains("volatility"));
    }
}
