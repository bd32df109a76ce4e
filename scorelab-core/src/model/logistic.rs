//! Binary logistic regression trained by full-batch gradient descent.
//!
//! Deterministic by construction: weights start at zero and the update
//! order is fixed, so the same rows and hyper-parameters always produce
//! the same fit. No RNG anywhere in the training path.

use serde::{Deserialize, Serialize};

use crate::model::features::{FeatureRow, FEATURE_COUNT};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    weights: FeatureRow,
    bias: f64,
}

impl LogisticModel {
    /// Fit on pre-scaled rows. `rows` and `labels` must be the same length
    /// and non-empty (the caller enforces the sample floor well above 1).
    pub fn fit(rows: &[FeatureRow], labels: &[f64], learning_rate: f64, max_iter: usize) -> Self {
        debug_assert_eq!(rows.len(), labels.len());
        let n = rows.len() as f64;

        let mut weights = [0.0; FEATURE_COUNT];
        let mut bias = 0.0;

        for _ in 0..max_iter {
            let mut weight_grads = [0.0; FEATURE_COUNT];
            let mut bias_grad = 0.0;

            for (row, &label) in rows.iter().zip(labels.iter()) {
                let pred = sigmoid(dot(&weights, row) + bias);
                let error = pred - label;
                for (g, &x) in weight_grads.iter_mut().zip(row.iter()) {
                    *g += error * x;
                }
                bias_grad += error;
            }

            for (w, g) in weights.iter_mut().zip(weight_grads.iter()) {
                *w -= learning_rate * g / n;
            }
            bias -= learning_rate * bias_grad / n;
        }

        Self { weights, bias }
    }

    /// P(label = 1) for one pre-scaled row.
    pub fn predict_proba(&self, row: &FeatureRow) -> f64 {
        sigmoid(dot(&self.weights, row) + self.bias)
    }

    pub fn weights(&self) -> &FeatureRow {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }
}

fn dot(weights: &FeatureRow, row: &FeatureRow) -> f64 {
    weights.iter().zip(row.iter()).map(|(w, x)| w * x).sum()
}

/// Numerically stable sigmoid.
fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
