//! CSV bar loading.
//!
//! Expected header: `date,open,high,low,close,volume` with ISO dates.
//! A file that is empty, malformed, or fails series validation surfaces a
//! typed error — never a silently substituted or truncated series.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use scorelab_core::domain::{Bar, PriceSeries, SeriesError};

/// Errors from the bar loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open '{path}': {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot read '{path}': {source}")]
    Csv {
        path: PathBuf,
        source: csv::Error,
    },

    #[error("'{path}' contains no bars")]
    Empty { path: PathBuf },

    #[error("'{path}' is not a valid series: {source}")]
    InvalidSeries {
        path: PathBuf,
        source: SeriesError,
    },

    #[error("cannot list universe directory '{path}': {source}")]
    ListDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no CSV files found under '{path}'")]
    EmptyUniverse { path: PathBuf },
}

/// One CSV row as stored on disk.
#[derive(Debug, Deserialize)]
struct CsvBar {
    date: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
}

/// Load one symbol's bars from a CSV file.
pub fn load_csv_bars(path: &Path, symbol: &str) -> Result<PriceSeries, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::Reader::from_reader(file);
    let mut bars = Vec::new();
    for row in reader.deserialize::<CsvBar>() {
        let row = row.map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        bars.push(Bar {
            symbol: symbol.to_string(),
            date: row.date,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume,
        });
    }

    if bars.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    PriceSeries::new(bars).map_err(|source| LoadError::InvalidSeries {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a universe from a directory of `SYMBOL.csv` files.
///
/// The symbol is the file stem, upper-cased. Files are returned sorted by
/// symbol so scans are reproducible regardless of directory order.
pub fn load_universe_dir(dir: &Path) -> Result<Vec<(String, PriceSeries)>, LoadError> {
    let entries = std::fs::read_dir(dir).map_err(|source| LoadError::ListDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("csv")))
        .collect();
    paths.sort();

    if paths.is_empty() {
        return Err(LoadError::EmptyUniverse {
            path: dir.to_path_buf(),
        });
    }

    let mut universe = Vec::with_capacity(paths.len());
    for path in paths {
        let symbol = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_uppercase())
            .unwrap_or_default();
        let series = load_csv_bars(&path, &symbol)?;
        universe.push((symbol, series));
    }

    Ok(universe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_path(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("scorelab-loader-{}-{name}", std::process::id()));
        p
    }

    #[test]
    fn loads_well_formed_csv() {
        let path = temp_path("ok.csv");
        let mut f = File::create(&path).unwrap();
        writeln!(f, "date,open,high,low,close,volume").unwrap();
        writeln!(f, "2024-01-02,100.0,105.0,98.0,103.0,6000000").unwrap();
        writeln!(f, "2024-01-03,103.0,106.0,101.0,104.0,5500000").unwrap();
        drop(f);

        let series = load_csv_bars(&path, "BBCA").unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.symbol(), "BBCA");
        assert_eq!(series.last().close, 104.0);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn empty_file_is_a_typed_error() {
        let path = temp_path("empty.csv");
        let mut f = File::create(&path).unwrap();
        writeln!(f, "date,open,high,low,close,volume").unwrap();
        drop(f);

        let err = load_csv_bars(&path, "X").unwrap_err();
        assert!(matches!(err, LoadError::Empty { .. }));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn duplicate_dates_are_rejected() {
        let path = temp_path("dup.csv");
        let mut f = File::create(&path).unwrap();
        writeln!(f, "date,open,high,low,close,volume").unwrap();
        writeln!(f, "2024-01-02,100.0,105.0,98.0,103.0,6000000").unwrap();
        writeln!(f, "2024-01-02,103.0,106.0,101.0,104.0,5500000").unwrap();
        drop(f);

        let err = load_csv_bars(&path, "X").unwrap_err();
        assert!(matches!(err, LoadError::InvalidSeries { .. }));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_file_is_a_typed_error() {
        let err = load_csv_bars(Path::new("/nonexistent/nope.csv"), "X").unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
    }
}
