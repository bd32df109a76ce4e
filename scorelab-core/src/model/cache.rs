//! Per-symbol trained-model cache.
//!
//! Keyed by symbol, guarded per entry: the outer map lock is held only to
//! find or insert a slot, then the slot's own lock serializes training and
//! scoring for that symbol. At most one retrain runs per symbol at a time,
//! and a reader can never observe a half-updated model.
//!
//! Each slot stores the fingerprint of the configuration that produced the
//! model (feature set, indicator windows, training hyper-parameters). A
//! mismatching fingerprint invalidates the slot and retrains — a cached
//! model is never silently served for a different feature set or horizon.
//! Failed fits (below the sample floor) are not cached, so longer history
//! on a later call gets a fresh training attempt.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::config::ModelConfig;
use crate::model::{FittedModel, ModelScore, ModelStatus, NEUTRAL_PROBABILITY};
use crate::snapshot::IndicatorSnapshot;

#[derive(Debug, Default)]
struct CacheSlot {
    fingerprint: String,
    model: Option<FittedModel>,
}

/// Thread-safe per-symbol model cache.
#[derive(Debug, Default)]
pub struct ModelCache {
    entries: Mutex<HashMap<String, Arc<Mutex<CacheSlot>>>>,
}

impl ModelCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score the latest snapshot for `symbol`, reusing a cached model when
    /// its fingerprint matches, retraining otherwise.
    pub fn score(
        &self,
        symbol: &str,
        fingerprint: &str,
        snapshots: &[IndicatorSnapshot],
        cfg: &ModelConfig,
    ) -> ModelScore {
        let slot = self.slot_for(symbol);
        let mut slot = slot.lock().expect("model cache slot lock poisoned");

        if slot.fingerprint != fingerprint {
            slot.fingerprint = fingerprint.to_string();
            slot.model = None;
        }

        if slot.model.is_none() {
            slot.model = FittedModel::fit(snapshots, cfg);
        }

        match (&slot.model, snapshots.last()) {
            (Some(model), Some(last)) => ModelScore {
                probability: model.score(last),
                status: ModelStatus::Trained {
                    samples: model.samples(),
                },
            },
            _ => ModelScore {
                probability: NEUTRAL_PROBABILITY,
                status: ModelStatus::Unavailable {
                    samples: snapshots.len().saturating_sub(cfg.horizon),
                    floor: cfg.min_train_rows,
                },
            },
        }
    }

    /// Drop the cached model for one symbol.
    pub fn invalidate(&self, symbol: &str) {
        self.entries
            .lock()
            .expect("model cache lock poisoned")
            .remove(symbol);
    }

    /// Number of symbols with a cache slot.
    pub fn len(&self) -> usize {
        self.entries.lock().expect("model cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot_for(&self, symbol: &str) -> Arc<Mutex<CacheSlot>> {
        let mut entries = self.entries.lock().expect("model cache lock poisoned");
        entries
            .entry(symbol.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(CacheSlot::default())))
            .clone()
    }
}
