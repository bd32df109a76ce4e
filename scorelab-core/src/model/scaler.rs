//! Zero-mean/unit-variance feature scaling.
//!
//! Fit on the training rows only — the scored (latest) bar is transformed
//! with statistics it did not contribute to. A zero-variance column keeps a
//! scale of 1.0 (centered only).

use serde::{Deserialize, Serialize};

use crate::model::features::{FeatureRow, FEATURE_COUNT};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    means: FeatureRow,
    stds: FeatureRow,
}

impl StandardScaler {
    /// Fit column means and standard deviations on the given rows.
    ///
    /// Returns `None` for an empty training set.
    pub fn fit(rows: &[FeatureRow]) -> Option<Self> {
        if rows.is_empty() {
            return None;
        }
        let n = rows.len() as f64;

        let mut means = [0.0; FEATURE_COUNT];
        for row in rows {
            for (m, v) in means.iter_mut().zip(row.iter()) {
                *m += v;
            }
        }
        for m in &mut means {
            *m /= n;
        }

        let mut stds = [0.0; FEATURE_COUNT];
        for row in rows {
            for ((s, v), m) in stds.iter_mut().zip(row.iter()).zip(means.iter()) {
                let d = v - m;
                *s += d * d;
            }
        }
        for s in &mut stds {
            *s = (*s / n).sqrt();
            if *s == 0.0 {
                *s = 1.0;
            }
        }

        Some(Self { means, stds })
    }

    /// Transform one row with the fitted statistics.
    pub fn transform(&self, row: &FeatureRow) -> FeatureRow {
        let mut out = [0.0; FEATURE_COUNT];
        for i in 0..FEATURE_COUNT {
            out[i] = (row[i] - self.means[i]) / self.stds[i];
        }
        out
    }

    /// Transform a batch of rows.
    pub fn transform_all(&self, rows: &[FeatureRow]) -> Vec<FeatureRow> {
        rows.iter().map(|r| self.transform(r)).collect()
    }
}
