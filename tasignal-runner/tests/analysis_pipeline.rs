//! Integration tests for the runner: config file → provider → batch → export.
//!
//! All data comes from CSV files in a temp directory or the synthetic
//! provider, so the suite runs offline.

use chrono::{Datelike, DateTime, NaiveDate, TimeZone, Utc, Weekday};
use proptest::prelude::*;
use std::path::Path;
use tasignal_core::data::SyntheticProvider;
use tasignal_core::engine::{AnalysisError, SignalTag};
use tasignal_runner::{
    analyze_batch, analyze_symbol, build_provider, save_report, AnalysisConfig, RunError,
    SourceKind,
};

fn as_of() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 4, 30, 20, 0, 0).unwrap()
}

/// Steady uptrend over every weekday from January to April 2024.
fn write_uptrend_csv(dir: &Path, symbol: &str) {
    let mut body = String::from("date,open,high,low,close,volume\n");
    let mut date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let mut i = 0;
    while date <= as_of().date_naive() {
        if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            let close = 20.0 + i as f64 * 0.25;
            body.push_str(&format!(
                "{date},{:.2},{:.2},{:.2},{close:.2},{}\n",
                close - 0.1,
                close + 0.3,
                close - 0.4,
                1_000_000
            ));
            i += 1;
        }
        date += chrono::Duration::days(1);
    }
    std::fs::write(dir.join(format!("{symbol}.csv")), body).unwrap();
}

fn csv_config(dir: &Path) -> AnalysisConfig {
    let toml = format!(
        "[data]\nsource = \"csv\"\ncsv_dir = {:?}\nlookback_days = 120\n\n[batch]\nmax_parallel = 2\n",
        dir.display().to_string()
    );
    let path = dir.join("tasignal.toml");
    std::fs::write(&path, toml).unwrap();
    AnalysisConfig::from_file(&path).unwrap()
}

#[test]
fn csv_batch_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    write_uptrend_csv(dir.path(), "VNM");
    write_uptrend_csv(dir.path(), "FPT");
    std::fs::write(
        dir.path().join("BROKEN.csv"),
        "date,open,high,low,close\n2024-04-01,1,2,0.5,1.5\n",
    )
    .unwrap();

    let config = csv_config(dir.path());
    assert_eq!(config.data.source, SourceKind::Csv);
    let provider = build_provider(&config.data).unwrap();

    let symbols: Vec<String> = ["vnm", "fpt", "broken", "missing"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let result = analyze_batch(&symbols, &config, provider.as_ref(), as_of()).unwrap();

    assert_eq!(result.reports.len(), 2);
    assert_eq!(result.failures.len(), 2);

    // A monotone uptrend: price above both averages, golden cross, RSI pinned high
    let vnm = &result.reports["VNM"];
    let tags = &vnm.signals.signals;
    assert!(tags.contains(&SignalTag::PriceAboveSma20));
    assert!(tags.contains(&SignalTag::GoldenCross));
    assert!(tags.contains(&SignalTag::RsiOverbought));
    assert_eq!(result.reports["FPT"].dataset_hash, vnm.dataset_hash);

    let broken = result
        .failures
        .iter()
        .find(|e| e.symbol() == Some("BROKEN"))
        .unwrap();
    assert!(matches!(
        broken,
        RunError::Analysis {
            source: AnalysisError::SchemaValidation { .. },
            ..
        }
    ));
    let missing = result
        .failures
        .iter()
        .find(|e| e.symbol() == Some("MISSING"))
        .unwrap();
    assert!(matches!(
        missing,
        RunError::Analysis {
            source: AnalysisError::DataFetch(_),
            ..
        }
    ));
    assert!(missing.to_string().starts_with("MISSING"));

    let out = dir.path().join("out");
    let path = save_report(vnm, &out).unwrap();
    assert!(path.ends_with("VNM_2024-04-30.json"));
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(json["symbol"], "VNM");
    assert!(json["signals"]["price_targets"]["fibonacci_levels"].is_object());
}

#[test]
fn single_bar_window_is_insufficient_history() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("ONE.csv"),
        "date,open,high,low,close,volume\n2024-04-29,10,11,9,10,100\n",
    )
    .unwrap();
    let config = csv_config(dir.path());
    let provider = build_provider(&config.data).unwrap();

    let err = analyze_symbol("ONE", &config, provider.as_ref(), as_of()).unwrap_err();
    assert!(matches!(
        err,
        RunError::Analysis {
            source: AnalysisError::InsufficientHistory { .. },
            ..
        }
    ));
}

fn arb_symbol() -> impl Strategy<Value = String> {
    prop_oneof!["[A-Z]{3}", "[a-z]{2} [a-z]"]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Every requested symbol ends up either in the reports or the failures.
    #[test]
    fn batch_accounts_for_every_symbol(symbols in prop::collection::vec(arb_symbol(), 0..6)) {
        let result = analyze_batch(
            &symbols,
            &AnalysisConfig::default(),
            &SyntheticProvider::new(),
            as_of(),
        )
        .unwrap();

        let mut distinct_valid: Vec<String> = symbols
            .iter()
            .filter(|s| !s.contains(' '))
            .cloned()
            .collect();
        distinct_valid.sort();
        distinct_valid.dedup();
        let invalid = symbols.iter().filter(|s| s.contains(' ')).count();

        prop_assert_eq!(result.reports.keys().cloned().collect::<Vec<_>>(), distinct_valid);
        prop_assert_eq!(result.failures.len(), invalid);
        for report in result.reports.values() {
            prop_assert!(report.signals.confidence <= 0.95);
        }
    }
}
