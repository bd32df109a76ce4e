//! Analysis configuration.
//!
//! Every threshold the pipeline consults lives here with a named field and a
//! documented default, serializable to/from TOML or JSON. The model section
//! participates in a deterministic BLAKE3 fingerprint used by the model
//! cache to detect configuration drift.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::model::FEATURE_NAMES;

/// Trading mode presets.
///
/// Swing uses the wider moving-average pair and a 5-bar label horizon;
/// scalping uses the tighter pair and a 1-bar horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradingMode {
    Swing,
    Scalping,
}

/// Indicator windows and the history floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    /// Fast moving-average window.
    pub fast_window: usize,
    /// Slow moving-average window.
    pub slow_window: usize,
    /// Long-horizon trend window. `None` selects adaptively from the
    /// history length: 200 if >=200 bars, else 100 if >=100, else 50 if
    /// >=50, else the full length.
    pub trend_window: Option<usize>,
    /// RSI lookback.
    pub rsi_period: usize,
    /// Support/resistance rolling-extrema window.
    pub sr_window: usize,
    /// Rolling mean volume window.
    pub volume_window: usize,
    /// Rolling mean bar-range (ATR proxy) window.
    pub atr_window: usize,
    /// MACD fast EMA period.
    pub macd_fast: usize,
    /// MACD slow EMA period.
    pub macd_slow: usize,
    /// MACD signal EMA period.
    pub macd_signal: usize,
    /// Hard floor on series length before any indicator runs.
    pub min_bars: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            fast_window: 20,
            slow_window: 50,
            trend_window: None,
            rsi_period: 14,
            sr_window: 20,
            volume_window: 20,
            atr_window: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            min_bars: 20,
        }
    }
}

/// Probability model settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Bars ahead used to define the up/down label.
    pub horizon: usize,
    /// Minimum labeled rows required to train; below this the model is
    /// disabled and the probability is exactly 0.5.
    pub min_train_rows: usize,
    /// Gradient-descent learning rate.
    pub learning_rate: f64,
    /// Gradient-descent iteration count.
    pub max_iter: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            horizon: 1,
            min_train_rows: 100,
            learning_rate: 0.1,
            max_iter: 300,
        }
    }
}

/// Confluence rule thresholds and decision cutoffs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Lower bound of the constructive RSI band (exclusive).
    pub rsi_band_low: f64,
    /// Upper bound of the constructive RSI band (exclusive).
    pub rsi_band_high: f64,
    /// RSI at or above this level scores -1.
    pub rsi_overbought: f64,
    /// Probability above this scores +1.
    pub prob_high: f64,
    /// Probability below this scores -1.
    pub prob_low: f64,
    /// Score at or above this is MEDIUM confidence.
    pub mid_cutoff: i32,
    /// Score at or above this is HIGH confidence.
    pub high_cutoff: i32,
    /// Score at or below this maps to SELL (after the low-confidence
    /// NO_TRADE override, which always wins).
    pub sell_cutoff: i32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            rsi_band_low: 30.0,
            rsi_band_high: 65.0,
            rsi_overbought: 70.0,
            prob_high: 0.6,
            prob_low: 0.4,
            mid_cutoff: 3,
            high_cutoff: 5,
            sell_cutoff: -2,
        }
    }
}

/// Buy/sell zone construction factors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneConfig {
    /// Buy zone floor: rolling support scaled by this factor.
    pub buy_support_factor: f64,
    /// Sell zone floor: rolling resistance scaled by this factor.
    pub sell_lower_factor: f64,
    /// Sell zone ceiling: rolling resistance scaled by this factor.
    pub sell_upper_factor: f64,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            buy_support_factor: 1.02,
            sell_lower_factor: 0.98,
            sell_upper_factor: 1.05,
        }
    }
}

/// Capital and per-trade risk parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Trading capital in account currency.
    pub capital: f64,
    /// Percent of capital risked per trade.
    pub risk_pct: f64,
    /// Shares per lot; 1 for markets without fixed lot sizing.
    pub lot_size: u64,
    /// Bars of recent lows considered when tightening the stop.
    pub stop_lookback: usize,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            capital: 10_000_000.0,
            risk_pct: 2.0,
            lot_size: 1,
            stop_lookback: 3,
        }
    }
}

/// Market eligibility floors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilityConfig {
    /// Minimum rolling mean volume.
    pub min_avg_volume: f64,
    /// Minimum ATR-to-price ratio.
    pub min_atr_ratio: f64,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            min_avg_volume: 5_000_000.0,
            min_atr_ratio: 0.01,
        }
    }
}

/// Full configuration for one `analyze` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzeConfig {
    pub indicators: IndicatorConfig,
    pub model: ModelConfig,
    pub scoring: ScoringConfig,
    pub zones: ZoneConfig,
    pub risk: RiskConfig,
    /// `None` disables the eligibility filter entirely.
    pub eligibility: Option<EligibilityConfig>,
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            indicators: IndicatorConfig::default(),
            model: ModelConfig::default(),
            scoring: ScoringConfig::default(),
            zones: ZoneConfig::default(),
            risk: RiskConfig::default(),
            eligibility: Some(EligibilityConfig::default()),
        }
    }
}

impl AnalyzeConfig {
    /// Preset for a trading mode: window pair and label horizon.
    pub fn for_mode(mode: TradingMode) -> Self {
        let mut cfg = Self::default();
        match mode {
            TradingMode::Swing => {
                cfg.indicators.fast_window = 20;
                cfg.indicators.slow_window = 50;
                cfg.model.horizon = 5;
            }
            TradingMode::Scalping => {
                cfg.indicators.fast_window = 9;
                cfg.indicators.slow_window = 20;
                cfg.model.horizon = 1;
            }
        }
        cfg
    }

    /// Check cross-field consistency before running the pipeline.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let ind = &self.indicators;
        if ind.fast_window == 0 || ind.slow_window == 0 || ind.rsi_period == 0 {
            return Err(AnalysisError::DegenerateInput(
                "indicator windows must be >= 1".into(),
            ));
        }
        if ind.fast_window >= ind.slow_window {
            return Err(AnalysisError::DegenerateInput(format!(
                "fast window ({}) must be shorter than slow window ({})",
                ind.fast_window, ind.slow_window
            )));
        }
        if ind.macd_fast >= ind.macd_slow {
            return Err(AnalysisError::DegenerateInput(format!(
                "MACD fast period ({}) must be shorter than slow period ({})",
                ind.macd_fast, ind.macd_slow
            )));
        }
        if self.model.horizon == 0 {
            return Err(AnalysisError::DegenerateInput(
                "label horizon must be >= 1".into(),
            ));
        }
        let sc = &self.scoring;
        if sc.rsi_band_low >= sc.rsi_band_high {
            return Err(AnalysisError::DegenerateInput(format!(
                "RSI band [{}, {}] is inverted",
                sc.rsi_band_low, sc.rsi_band_high
            )));
        }
        if sc.prob_low >= sc.prob_high {
            return Err(AnalysisError::DegenerateInput(format!(
                "probability thresholds [{}, {}] are inverted",
                sc.prob_low, sc.prob_high
            )));
        }
        if sc.mid_cutoff > sc.high_cutoff {
            return Err(AnalysisError::DegenerateInput(format!(
                "mid cutoff ({}) above high cutoff ({})",
                sc.mid_cutoff, sc.high_cutoff
            )));
        }
        if !(self.risk.capital > 0.0) {
            return Err(AnalysisError::DegenerateInput(
                "capital must be positive".into(),
            ));
        }
        if !(self.risk.risk_pct > 0.0 && self.risk.risk_pct <= 100.0) {
            return Err(AnalysisError::DegenerateInput(format!(
                "risk_pct ({}) must be in (0, 100]",
                self.risk.risk_pct
            )));
        }
        if self.risk.lot_size == 0 {
            return Err(AnalysisError::DegenerateInput(
                "lot_size must be >= 1".into(),
            ));
        }
        Ok(())
    }

    /// Deterministic fingerprint of everything that shapes a trained model:
    /// the feature set, the indicator windows that produce those features,
    /// and the training hyper-parameters. The model cache invalidates an
    /// entry whose fingerprint no longer matches.
    pub fn model_fingerprint(&self) -> String {
        #[derive(Serialize)]
        struct Fingerprint<'a> {
            features: &'a [&'a str],
            indicators: &'a IndicatorConfig,
            model: &'a ModelConfig,
        }
        let fp = Fingerprint {
            features: &FEATURE_NAMES,
            indicators: &self.indicators,
            model: &self.model,
        };
        let json = serde_json::to_string(&fp).expect("fingerprint serialization failed");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}
