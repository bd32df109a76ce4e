//! ScoreLab CLI — analyze, scan, and demo commands.
//!
//! Commands:
//! - `analyze` — score one symbol from a CSV bar file
//! - `scan` — score a directory of CSV files and print the ranked table
//! - `demo` — score a seeded synthetic series (no data files needed)
//!
//! Configuration comes from an optional TOML file (same shape as
//! `AnalyzeConfig`) with a few common overrides exposed as flags.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use scorelab_core::analyze::{analyze, DecisionRecord};
use scorelab_core::config::{AnalyzeConfig, TradingMode};
use scorelab_core::model::ModelCache;
use scorelab_scan::{
    load_csv_bars, load_universe_dir, random_walk_series, scan_universe, SyntheticSpec,
};

#[derive(Parser)]
#[command(name = "scorelab", about = "ScoreLab CLI — confluence-scored trading decisions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one symbol from a CSV file (date,open,high,low,close,volume).
    Analyze {
        /// Path to the CSV bar file.
        csv: PathBuf,

        /// Symbol name. Defaults to the file stem, upper-cased.
        #[arg(long)]
        symbol: Option<String>,

        #[command(flatten)]
        config: ConfigArgs,

        /// Emit the full decision record as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Score every SYMBOL.csv under a directory and print the ranking.
    Scan {
        /// Directory of CSV bar files.
        dir: PathBuf,

        #[command(flatten)]
        config: ConfigArgs,

        /// Emit the ranked rows as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Score a seeded synthetic random walk (debug data, clearly tagged).
    Demo {
        /// Trading days to generate.
        #[arg(long, default_value_t = 300)]
        days: usize,

        /// RNG seed.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        #[command(flatten)]
        config: ConfigArgs,

        /// Emit the full decision record as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

/// Configuration source plus common overrides.
#[derive(clap::Args)]
struct ConfigArgs {
    /// Path to a TOML config file (AnalyzeConfig shape).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Trading mode preset: swing or scalping. Ignored when --config is given.
    #[arg(long)]
    mode: Option<String>,

    /// Override trading capital.
    #[arg(long)]
    capital: Option<f64>,

    /// Override risk percent per trade.
    #[arg(long)]
    risk_pct: Option<f64>,

    /// Disable the liquidity/volatility eligibility filter.
    #[arg(long, default_value_t = false)]
    no_eligibility: bool,
}

impl ConfigArgs {
    fn resolve(&self) -> Result<AnalyzeConfig> {
        let mut cfg = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("cannot read config file '{}'", path.display()))?;
                toml::from_str(&text)
                    .with_context(|| format!("invalid config file '{}'", path.display()))?
            }
            None => match self.mode.as_deref() {
                Some(mode) => AnalyzeConfig::for_mode(parse_mode(mode)?),
                None => AnalyzeConfig::default(),
            },
        };

        if let Some(capital) = self.capital {
            cfg.risk.capital = capital;
        }
        if let Some(risk_pct) = self.risk_pct {
            cfg.risk.risk_pct = risk_pct;
        }
        if self.no_eligibility {
            cfg.eligibility = None;
        }

        Ok(cfg)
    }
}

fn parse_mode(mode: &str) -> Result<TradingMode> {
    match mode.to_ascii_lowercase().as_str() {
        "swing" => Ok(TradingMode::Swing),
        "scalping" => Ok(TradingMode::Scalping),
        other => anyhow::bail!("unknown mode '{other}' (expected swing or scalping)"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            csv,
            symbol,
            config,
            json,
        } => run_analyze(csv, symbol, &config, json),
        Commands::Scan { dir, config, json } => run_scan(dir, &config, json),
        Commands::Demo {
            days,
            seed,
            config,
            json,
        } => run_demo(days, seed, &config, json),
    }
}

fn run_analyze(csv: PathBuf, symbol: Option<String>, config: &ConfigArgs, json: bool) -> Result<()> {
    let cfg = config.resolve()?;
    let symbol = symbol.unwrap_or_else(|| {
        csv.file_stem()
            .map(|s| s.to_string_lossy().to_uppercase())
            .unwrap_or_else(|| "UNKNOWN".to_string())
    });

    let series = load_csv_bars(&csv, &symbol)?;
    let record = analyze(&series, &cfg)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        print_record(&record);
    }
    Ok(())
}

fn run_scan(dir: PathBuf, config: &ConfigArgs, json: bool) -> Result<()> {
    let cfg = config.resolve()?;
    let universe = load_universe_dir(&dir)?;
    let cache = ModelCache::new();
    let report = scan_universe(&universe, &cfg, &cache);

    if json {
        println!("{}", serde_json::to_string_pretty(&report.ranked)?);
    } else {
        println!(
            "{:<8} {:>6} {:>6} {:>10} {:>8} {:>10} {:>9}",
            "SYMBOL", "SCORE", "GRADE", "DECISION", "CONF", "PRICE", "PROB"
        );
        for row in &report.ranked {
            println!(
                "{:<8} {:>6} {:>6} {:>10} {:>8} {:>10.2} {:>9.2}",
                row.symbol,
                row.score,
                format!("{:?}", row.grade),
                format!("{:?}", row.decision),
                format!("{:?}", row.confidence),
                row.price,
                row.probability,
            );
        }
        if !report.failures.is_empty() {
            println!("\nSkipped:");
            for failure in &report.failures {
                println!("  {}: {}", failure.symbol, failure.reason);
            }
        }
    }
    Ok(())
}

fn run_demo(days: usize, seed: u64, config: &ConfigArgs, json: bool) -> Result<()> {
    let cfg = config.resolve()?;
    let spec = SyntheticSpec {
        days,
        seed,
        ..SyntheticSpec::default()
    };
    let series = random_walk_series("DEMO", &spec);
    let record = analyze(&series, &cfg)?;

    println!("(synthetic data — seed {seed}, {days} bars)");
    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        print_record(&record);
    }
    Ok(())
}

fn print_record(record: &DecisionRecord) {
    println!("{} as of {}", record.symbol, record.as_of);
    println!("  price        {:.2}", record.price);
    println!("  trend bias   {:?}", record.trend_bias);
    println!(
        "  score        {} ({:?} confidence)",
        record.score, record.confidence
    );
    println!("  decision     {:?}", record.decision);
    println!(
        "  probability  {:.2} ({:?})",
        record.probability, record.model_status
    );
    println!(
        "  buy zone     {:.2} – {:.2}",
        record.risk.buy_zone.low, record.risk.buy_zone.high
    );
    println!(
        "  sell zone    {:.2} – {:.2}",
        record.risk.sell_zone.low, record.risk.sell_zone.high
    );
    println!("  stop loss    {:.2}", record.risk.stop_loss);
    println!(
        "  max size     {} units ({} lots), risking {:.0}",
        record.risk.max_units, record.risk.max_lots, record.risk.risk_amount
    );
    println!("  reward/risk  {:.2}R", record.risk.reward_risk_ratio);
}
