//! ScoreLab Scan — universe scanning on top of `scorelab-core`.
//!
//! This crate owns the collaborator-side plumbing the core deliberately
//! excludes:
//! - CSV bar loading with typed errors
//! - Seeded synthetic bar generation (demo/debug data, always tagged)
//! - Parallel multi-symbol scanning over a shared model cache
//! - Score ranking with letter grades

pub mod loader;
pub mod rank;
pub mod scan;
pub mod synthetic;

pub use loader::{load_csv_bars, load_universe_dir, LoadError};
pub use rank::{grade_for, rank_records, Grade, RankedSymbol};
pub use scan::{scan_universe, ScanFailure, ScanReport};
pub use synthetic::{random_walk_series, SyntheticSpec};
