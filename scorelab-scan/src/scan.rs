//! Parallel universe scanning.
//!
//! Each symbol's pipeline is independent, so the scan fans out across a
//! rayon pool. The only shared state is the model cache, which locks per
//! symbol — workers never contend except on the brief map access.

use rayon::prelude::*;

use scorelab_core::analyze::{analyze_cached, DecisionRecord};
use scorelab_core::config::AnalyzeConfig;
use scorelab_core::domain::PriceSeries;
use scorelab_core::model::ModelCache;

use crate::rank::{rank_records, RankedSymbol};

/// A symbol that failed to produce a record, with the rendered reason.
#[derive(Debug, Clone)]
pub struct ScanFailure {
    pub symbol: String,
    pub reason: String,
}

/// Outcome of scanning a universe.
#[derive(Debug)]
pub struct ScanReport {
    /// Successful records, ranked by score descending.
    pub ranked: Vec<RankedSymbol>,
    /// Full records in ranked order.
    pub records: Vec<DecisionRecord>,
    /// Symbols that returned a typed failure.
    pub failures: Vec<ScanFailure>,
}

/// Analyze every symbol in the universe in parallel and rank the results.
pub fn scan_universe(
    universe: &[(String, PriceSeries)],
    cfg: &AnalyzeConfig,
    cache: &ModelCache,
) -> ScanReport {
    let outcomes: Vec<(String, Result<DecisionRecord, String>)> = universe
        .par_iter()
        .map(|(symbol, series)| {
            let result = analyze_cached(series, cfg, cache).map_err(|e| e.to_string());
            (symbol.clone(), result)
        })
        .collect();

    let mut records = Vec::new();
    let mut failures = Vec::new();
    for (symbol, result) in outcomes {
        match result {
            Ok(record) => records.push(record),
            Err(reason) => failures.push(ScanFailure { symbol, reason }),
        }
    }

    let ranked = rank_records(&records, &cfg.scoring);

    // Reorder the full records to match the ranking.
    let mut by_symbol: std::collections::HashMap<String, DecisionRecord> = records
        .into_iter()
        .map(|r| (r.symbol.clone(), r))
        .collect();
    let records = ranked
        .iter()
        .filter_map(|r| by_symbol.remove(&r.symbol))
        .collect();

    ScanReport {
        ranked,
        records,
        failures,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::{random_walk_series, SyntheticSpec};

    fn universe(n: usize) -> Vec<(String, PriceSeries)> {
        (0..n)
            .map(|i| {
                let symbol = format!("SYM{i}");
                let spec = SyntheticSpec {
                    seed: 1000 + i as u64,
                    ..SyntheticSpec::default()
                };
                (symbol.clone(), random_walk_series(&symbol, &spec))
            })
            .collect()
    }

    fn config() -> AnalyzeConfig {
        AnalyzeConfig {
            eligibility: None,
            ..AnalyzeConfig::default()
        }
    }

    #[test]
    fn scan_covers_every_symbol() {
        let universe = universe(6);
        let cache = ModelCache::new();
        let report = scan_universe(&universe, &config(), &cache);
        assert_eq!(report.ranked.len() + report.failures.len(), 6);
        assert_eq!(report.records.len(), report.ranked.len());
    }

    #[test]
    fn ranking_is_score_descending() {
        let universe = universe(8);
        let cache = ModelCache::new();
        let report = scan_universe(&universe, &config(), &cache);
        for pair in report.ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn scan_is_deterministic_across_runs() {
        let universe = universe(5);
        let a = scan_universe(&universe, &config(), &ModelCache::new());
        let b = scan_universe(&universe, &config(), &ModelCache::new());
        let sym_a: Vec<_> = a.ranked.iter().map(|r| (&r.symbol, r.score)).collect();
        let sym_b: Vec<_> = b.ranked.iter().map(|r| (&r.symbol, r.score)).collect();
        assert_eq!(sym_a, sym_b);
    }

    #[test]
    fn cache_fills_one_slot_per_symbol() {
        let universe = universe(4);
        let cache = ModelCache::new();
        scan_universe(&universe, &config(), &cache);
        // Slots exist only for symbols whose model actually trained; a
        // second scan must not grow the cache further.
        let len_after_first = cache.len();
        scan_universe(&universe, &config(), &cache);
        assert_eq!(cache.len(), len_after_first);
    }
}
