//! ScoreLab Core — single-symbol decision-support engine.
//!
//! The pipeline is a pure function of one OHLCV history and a config:
//! - Indicator engine (moving averages, RSI, MACD, support/resistance,
//!   volume and range statistics) with a warm-up trim
//! - Probability model (logistic classifier over snapshot features, with a
//!   neutral fallback below the sample floor)
//! - Confluence scorer and decision mapping (LOW confidence always forces
//!   NO_TRADE)
//! - Risk calculator (structure-based stop, percent-risk sizing, zones)
//!
//! `analyze` is the single entry point; `analyze_cached` adds the
//! per-symbol trained-model cache for universe scans.

pub mod analyze;
pub mod config;
pub mod domain;
pub mod eligibility;
pub mod error;
pub mod indicators;
pub mod model;
pub mod risk;
pub mod scoring;
pub mod snapshot;

pub use analyze::{analyze, analyze_cached, DecisionRecord};
pub use config::{AnalyzeConfig, TradingMode};
pub use domain::{Bar, PriceSeries};
pub use error::AnalysisError;
pub use model::{ModelCache, ModelStatus, NEUTRAL_PROBABILITY};
pub use scoring::{Confidence, Decision, TrendBias};
