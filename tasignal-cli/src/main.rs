//! tasignal CLI: technical signal reports from the command line.
//!
//! Commands:
//! - `analyze`: full analysis for one symbol, printed as a summary or JSON
//! - `batch`: analyze many symbols in parallel, one line per symbol
//! - `config`: print the effective configuration as TOML

use anyhow::{bail, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tasignal_core::engine::FullAnalysisReport;
use tasignal_runner::{
    analyze_batch, analyze_symbol, build_provider, export_json, save_report, AnalysisConfig,
    SourceKind,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tasignal",
    about = "tasignal CLI: indicator fusion and trading signal reports"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a single symbol.
    Analyze {
        /// Ticker symbol (e.g., VNM, AAPL, ^GSPC).
        symbol: String,

        #[command(flatten)]
        opts: RunOpts,

        /// Print the full JSON report instead of a summary.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Analyze several symbols in parallel.
    Batch {
        /// Ticker symbols.
        #[arg(required = true)]
        symbols: Vec<String>,

        #[command(flatten)]
        opts: RunOpts,

        /// Print all successful reports as one JSON object keyed by symbol.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the effective configuration (file plus flags) as TOML.
    Config {
        #[command(flatten)]
        opts: RunOpts,
    },
}

/// Options shared by every command. Flags override the config file.
#[derive(Args)]
struct RunOpts {
    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Calendar days of history to analyze.
    #[arg(long)]
    days: Option<u32>,

    /// Data source: yahoo, csv or synthetic.
    #[arg(long)]
    source: Option<SourceKind>,

    /// Directory of {SYMBOL}.csv files for the csv source.
    #[arg(long)]
    csv_dir: Option<PathBuf>,

    /// Write each report to {dir}/{SYMBOL}_{date}.json.
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

impl RunOpts {
    fn effective_config(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::from_file(path)?,
            None => AnalysisConfig::default(),
        };
        if let Some(days) = self.days {
            config.data.lookback_days = days;
        }
        if let Some(source) = self.source {
            config.data.source = source;
        }
        if let Some(dir) = &self.csv_dir {
            config.data.csv_dir = dir.clone();
            // Pointing at a CSV directory implies the csv source
            if self.source.is_none() {
                config.data.source = SourceKind::Csv;
            }
        }
        config.validate()?;
        tracing::debug!(?config, "effective config");
        Ok(config)
    }
}

fn main() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tasignal=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { symbol, opts, json } => run_analyze(&symbol, &opts, json),
        Commands::Batch {
            symbols,
            opts,
            json,
        } => run_batch(&symbols, &opts, json),
        Commands::Config { opts } => {
            print!("{}", opts.effective_config()?.to_toml()?);
            Ok(())
        }
    }
}

fn run_analyze(symbol: &str, opts: &RunOpts, json: bool) -> Result<()> {
    let config = opts.effective_config()?;
    let provider = build_provider(&config.data)?;

    let report = analyze_symbol(symbol, &config, provider.as_ref(), Utc::now())?;

    if json {
        println!("{}", export_json(&report)?);
    } else {
        print_summary(&report);
    }

    if let Some(dir) = &opts.output_dir {
        let path = save_report(&report, dir)?;
        eprintln!("Report saved to: {}", path.display());
    }

    Ok(())
}

fn run_batch(symbols: &[String], opts: &RunOpts, json: bool) -> Result<()> {
    let config = opts.effective_config()?;
    let provider = build_provider(&config.data)?;

    let result = analyze_batch(symbols, &config, provider.as_ref(), Utc::now())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result.reports)?);
    } else {
        println!(
            "{:<10} {:>12} {:>9} {:<12} {:>10} {:>7}",
            "Symbol", "Price", "Change", "Signal", "Confidence", "Score"
        );
        println!("{}", "-".repeat(65));
        for report in result.reports.values() {
            println!(
                "{:<10} {:>12.2} {:>8.2}% {:<12} {:>9.0}% {:>7.1}",
                report.symbol,
                report.market_data.current_price,
                report.market_data.change_percent,
                report.signals.recommendation.as_str(),
                report.signals.confidence * 100.0,
                report.signals.technical_score
            );
        }
    }

    for err in &result.failures {
        eprintln!("FAILED {err}");
    }

    if let Some(dir) = &opts.output_dir {
        for report in result.reports.values() {
            save_report(report, dir)?;
        }
        eprintln!(
            "{} report(s) saved to: {}",
            result.reports.len(),
            dir.display()
        );
    }

    if result.all_failed() {
        bail!("all {} symbol(s) failed", result.failures.len());
    }
    Ok(())
}

fn fmt_level(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}"))
}

fn print_summary(report: &FullAnalysisReport) {
    let signals = &report.signals;
    let market = &report.market_data;
    let targets = &signals.price_targets;

    println!();
    println!("=== {} Technical Analysis ===", report.symbol);
    println!(
        "As of:          {} (last bar {}, {} bars)",
        report.analysis_date.format("%Y-%m-%d %H:%M UTC"),
        report.last_bar_date,
        report.bars_analyzed
    );
    println!(
        "Price:          {:.2} ({:+.2}%)",
        market.current_price, market.change_percent
    );
    println!();
    println!("--- Signal ---");
    println!("Recommendation: {}", signals.recommendation);
    println!("Confidence:     {:.0}%", signals.confidence * 100.0);
    println!("Score:          {:.1}", signals.technical_score);
    if !signals.signals.is_empty() {
        let tags: Vec<&str> = signals.signals.iter().map(|t| t.as_str()).collect();
        println!("Signals:        {}", tags.join(", "));
    }
    for reason in &signals.reasons {
        println!("  - {reason}");
    }
    println!();
    println!("--- Targets ---");
    println!(
        "Short term:     target {} / stop {}",
        fmt_level(targets.short_term_target),
        fmt_level(targets.short_term_stop)
    );
    println!(
        "Medium term:    target {:.2} / stop {}",
        targets.medium_term_target,
        fmt_level(targets.medium_term_stop)
    );
    let fib: Vec<String> = targets
        .fibonacci_levels
        .iter()
        .map(|(ratio, price)| format!("{ratio}={price:.2}"))
        .collect();
    println!("Fibonacci:      {}", fib.join("  "));
    let levels = |v: &[f64]| {
        v.iter()
            .map(|p| format!("{p:.2}"))
            .collect::<Vec<_>>()
            .join(", ")
    };
    println!(
        "Resistance:     {}",
        levels(&signals.support_resistance.resistance)
    );
    println!("Support:        {}", levels(&signals.support_resistance.support));
    println!();
    println!("--- Volatility ---");
    println!("ATR:            {}", fmt_level(report.volatility.atr));
    println!("BB width:       {}%", fmt_level(report.volatility.bb_width));
    println!();
}
