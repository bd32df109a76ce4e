//! Feature and label engineering for the probability model.
//!
//! Features come straight from the indicator snapshot; labels look
//! `horizon` bars ahead, so the last `horizon` rows are unlabeled and are
//! excluded from training (they would leak the future into the fit).

use crate::snapshot::IndicatorSnapshot;

/// Number of model features.
pub const FEATURE_COUNT: usize = 4;

/// Feature names, in column order. Part of the model fingerprint.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = ["rsi", "macd", "ma_fast", "ma_slow"];

/// One feature row, column order per [`FEATURE_NAMES`].
pub type FeatureRow = [f64; FEATURE_COUNT];

/// Extract the feature row for a single snapshot.
pub fn feature_row(snapshot: &IndicatorSnapshot) -> FeatureRow {
    [
        snapshot.rsi,
        snapshot.macd,
        snapshot.ma_fast,
        snapshot.ma_slow,
    ]
}

/// Labeled training rows: everything except the last `horizon` snapshots.
#[derive(Debug, Clone, Default)]
pub struct TrainingSet {
    pub rows: Vec<FeatureRow>,
    pub labels: Vec<f64>,
}

impl TrainingSet {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Build the training set: `label[i] = 1` iff `close[i + horizon] > close[i]`.
pub fn build_training_set(snapshots: &[IndicatorSnapshot], horizon: usize) -> TrainingSet {
    let n = snapshots.len();
    if horizon == 0 || n <= horizon {
        return TrainingSet::default();
    }

    let mut rows = Vec::with_capacity(n - horizon);
    let mut labels = Vec::with_capacity(n - horizon);
    for i in 0..n - horizon {
        rows.push(feature_row(&snapshots[i]));
        let up = snapshots[i + horizon].close > snapshots[i].close;
        labels.push(if up { 1.0 } else { 0.0 });
    }

    TrainingSet { rows, labels }
}
