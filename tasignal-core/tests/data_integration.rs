//! Integration tests for the data pipeline: provider → ingest → indicators → report.
//!
//! Everything runs offline against CSV files written to a temp directory
//! and the synthetic provider.

use chrono::{Datelike, NaiveDate, TimeZone, Utc, Weekday};
use std::path::Path;
use tasignal_core::data::{
    ingest, CsvProvider, DataError, DataProvider, DataSource, SyntheticProvider,
};
use tasignal_core::engine::{AnalysisContext, AnalysisError, SignalEngine};
use tasignal_core::indicators::{compute_standard, keys, IndicatorSettings};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// 80 weekday rows, written newest-first with one duplicate and one broken bar.
fn write_messy_csv(dir: &Path, symbol: &str) -> usize {
    let mut rows = Vec::new();
    let mut date = d(2024, 1, 2);
    let mut i = 0;
    while rows.len() < 80 {
        if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            let close = 50.0 + (i as f64 * 0.2).sin() * 4.0 + i as f64 * 0.1;
            let open = close - 0.4;
            rows.push(format!(
                "{date},{open:.4},{:.4},{:.4},{close:.4},{}",
                close + 1.0,
                open - 1.0,
                100_000 + i * 1_000
            ));
            i += 1;
        }
        date += chrono::Duration::days(1);
    }
    let clean = rows.len();

    // duplicate of the first session, and a bar with high < low
    rows.push(rows[0].clone());
    rows.push("2024-06-28,10.0,9.0,11.0,10.0,500".to_string());
    rows.reverse();

    let body = format!("Date,Open,High,Low,Close,Volume\n{}\n", rows.join("\n"));
    std::fs::write(dir.join(format!("{symbol}.csv")), body).unwrap();
    clean
}

#[test]
fn csv_file_flows_through_ingest_into_a_report() {
    let dir = tempfile::tempdir().unwrap();
    let clean = write_messy_csv(dir.path(), "FPT");

    let provider = CsvProvider::new(dir.path());
    assert!(provider.is_available());
    let fetched = provider.fetch("FPT", d(2024, 1, 1), d(2024, 12, 31)).unwrap();
    assert_eq!(fetched.source, DataSource::CsvImport);
    assert_eq!(fetched.bars.len(), clean + 2);

    let ingested = ingest("FPT", fetched.bars).unwrap();
    assert_eq!(ingested.duplicates_dropped, 1);
    assert_eq!(ingested.invalid_dropped, 1);
    assert_eq!(ingested.bars.len(), clean);
    assert!(ingested.bars.windows(2).all(|w| w[0].date < w[1].date));

    let series = compute_standard(&ingested.bars, &IndicatorSettings::default());
    let ctx = AnalysisContext::new("FPT", ingested.bars, series).unwrap();
    let at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
    let report = SignalEngine::default().full_analysis(&ctx, at).unwrap();

    assert_eq!(report.bars_analyzed, clean);
    assert_eq!(report.indicators.len(), keys::ALL.len());
    assert!(report.indicators[keys::SMA_50].is_some());
    assert_eq!(report.analysis_date, at);
}

#[test]
fn csv_without_volume_column_is_schema_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("NOVOL.csv"),
        "date,open,high,low,close\n2024-01-02,1,2,0.5,1.5\n",
    )
    .unwrap();

    let err = CsvProvider::new(dir.path())
        .fetch("NOVOL", d(2024, 1, 1), d(2024, 12, 31))
        .unwrap_err();
    assert!(matches!(err, DataError::MissingColumn { .. }));

    let err = AnalysisError::from(err);
    assert!(matches!(err, AnalysisError::SchemaValidation { .. }));
}

#[test]
fn all_invalid_bars_is_insufficient_history() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("BAD.csv"),
        "date,open,high,low,close,volume\n\
         2024-01-02,10,9,11,10,100\n\
         2024-01-03,-1,2,0.5,1,100\n",
    )
    .unwrap();

    let fetched = CsvProvider::new(dir.path())
        .fetch("BAD", d(2024, 1, 1), d(2024, 12, 31))
        .unwrap();
    let err = ingest("BAD", fetched.bars).unwrap_err();
    assert!(matches!(err, DataError::NoUsableBars { .. }));
    assert!(matches!(
        AnalysisError::from(err),
        AnalysisError::InsufficientHistory { .. }
    ));
}

#[test]
fn synthetic_provider_is_deterministic_weekday_data() {
    let provider = SyntheticProvider::new();
    let (start, end) = (d(2024, 1, 1), d(2024, 3, 31));

    let a = provider.fetch("VNM", start, end).unwrap();
    let b = provider.fetch("VNM", start, end).unwrap();
    let other = provider.fetch("HPG", start, end).unwrap();

    assert_eq!(a.source, DataSource::Synthetic);
    assert_eq!(a.bars, b.bars);
    assert_ne!(a.bars, other.bars);
    assert!(a
        .bars
        .iter()
        .all(|bar| !matches!(bar.date.weekday(), Weekday::Sat | Weekday::Sun)));
    assert!(a.bars.iter().all(|bar| bar.is_sane()));
    assert!(a.bars.first().unwrap().date >= start);
    assert!(a.bars.last().unwrap().date <= end);
}

#[test]
fn synthetic_history_produces_full_report() {
    let fetched = SyntheticProvider::new()
        .fetch("MWG", d(2024, 1, 1), d(2024, 6, 30))
        .unwrap();
    let ingested = ingest("MWG", fetched.bars).unwrap();
    assert_eq!(ingested.duplicates_dropped, 0);
    assert_eq!(ingested.invalid_dropped, 0);

    let series = compute_standard(&ingested.bars, &IndicatorSettings::default());
    let ctx = AnalysisContext::new("MWG", ingested.bars, series).unwrap();
    let engine = SignalEngine::default();
    let at = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();

    let first = engine.full_analysis(&ctx, at).unwrap();
    let second = engine.full_analysis(&ctx, at).unwrap();
    assert_eq!(first, second);
    assert!(first.indicators.values().all(Option::is_some));
}
