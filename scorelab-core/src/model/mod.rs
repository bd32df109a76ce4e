//! Probability model: a small logistic classifier over snapshot features.
//!
//! The model estimates P(close rises within `horizon` bars) from the most
//! recent bar's features. Training excludes the last `horizon` rows (their
//! labels would require future closes) and the scaler is fit on the
//! training window only.
//!
//! Below the sample floor the model is disabled — the probability is
//! exactly [`NEUTRAL_PROBABILITY`]. That is a defined fallback, not an
//! error.

pub mod cache;
pub mod features;
pub mod logistic;
pub mod scaler;

pub use cache::ModelCache;
pub use features::{build_training_set, feature_row, FeatureRow, FEATURE_COUNT, FEATURE_NAMES};
pub use logistic::LogisticModel;
pub use scaler::StandardScaler;

use serde::{Deserialize, Serialize};

use crate::config::ModelConfig;
use crate::snapshot::IndicatorSnapshot;

/// Probability emitted when the model cannot train. A hard floor, not a
/// soft decay.
pub const NEUTRAL_PROBABILITY: f64 = 0.5;

/// Whether the probability came from a trained model or the neutral
/// fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModelStatus {
    Trained { samples: usize },
    Unavailable { samples: usize, floor: usize },
}

/// A probability plus its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelScore {
    pub probability: f64,
    pub status: ModelStatus,
}

impl ModelScore {
    fn neutral(samples: usize, floor: usize) -> Self {
        Self {
            probability: NEUTRAL_PROBABILITY,
            status: ModelStatus::Unavailable { samples, floor },
        }
    }
}

/// A fitted scaler + classifier pair, reusable across calls via the cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FittedModel {
    scaler: StandardScaler,
    model: LogisticModel,
    samples: usize,
}

impl FittedModel {
    /// Train on the labeled portion of the snapshots. Returns `None` when
    /// the labeled row count is below the configured floor.
    pub fn fit(snapshots: &[IndicatorSnapshot], cfg: &ModelConfig) -> Option<Self> {
        let set = build_training_set(snapshots, cfg.horizon);
        if set.len() < cfg.min_train_rows {
            return None;
        }

        let scaler = StandardScaler::fit(&set.rows)?;
        let scaled = scaler.transform_all(&set.rows);
        let model = LogisticModel::fit(&scaled, &set.labels, cfg.learning_rate, cfg.max_iter);

        Some(Self {
            scaler,
            model,
            samples: set.len(),
        })
    }

    /// Score one snapshot row with the fitted scaler and classifier.
    pub fn score(&self, snapshot: &IndicatorSnapshot) -> f64 {
        let row = self.scaler.transform(&feature_row(snapshot));
        self.model.predict_proba(&row)
    }

    pub fn samples(&self) -> usize {
        self.samples
    }
}

/// Train on the history and score the latest bar, falling back to the
/// neutral probability below the sample floor.
pub fn train_and_score(snapshots: &[IndicatorSnapshot], cfg: &ModelConfig) -> ModelScore {
    let labeled = snapshots.len().saturating_sub(cfg.horizon);
    match FittedModel::fit(snapshots, cfg) {
        Some(fitted) => {
            let last = match snapshots.last() {
                Some(s) => s,
                None => return ModelScore::neutral(0, cfg.min_train_rows),
            };
            ModelScore {
                probability: fitted.score(last),
                status: ModelStatus::Trained {
                    samples: fitted.samples(),
                },
            }
        }
        None => ModelScore::neutral(labeled, cfg.min_train_rows),
    }
}
