//! Provider selection and bar loading for the runner.
//!
//! `build_provider` turns the `[data]` section into a concrete provider;
//! `load_bars` fetches one symbol's window and runs it through ingest so
//! everything downstream sees sorted, de-duplicated, sane bars.

use chrono::NaiveDate;
use std::path::PathBuf;
use tasignal_core::data::{
    ingest, CsvProvider, DataError, DataProvider, DataSource, SyntheticProvider, YahooProvider,
};
use tasignal_core::domain::Bar;
use thiserror::Error;

use crate::config::{DataConfig, SourceKind};

/// Errors raised while setting up a provider.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("CSV directory does not exist: {}", path.display())]
    CsvDirMissing { path: PathBuf },

    #[error("failed to initialise data provider: {0}")]
    Provider(#[from] DataError),
}

/// Bars for one symbol after ingest, with provenance.
#[derive(Debug, Clone)]
pub struct LoadedBars {
    pub symbol: String,
    pub bars: Vec<Bar>,
    pub source: DataSource,
    pub duplicates_dropped: usize,
    pub invalid_dropped: usize,
}

/// Construct the provider named by `config.source`.
pub fn build_provider(config: &DataConfig) -> Result<Box<dyn DataProvider>, LoadError> {
    let provider: Box<dyn DataProvider> = match config.source {
        SourceKind::Yahoo => Box::new(YahooProvider::new()?),
        SourceKind::Csv => {
            if !config.csv_dir.is_dir() {
                return Err(LoadError::CsvDirMissing {
                    path: config.csv_dir.clone(),
                });
            }
            Box::new(CsvProvider::new(&config.csv_dir))
        }
        SourceKind::Synthetic => Box::new(SyntheticProvider::new()),
    };
    tracing::debug!(provider = provider.name(), "data provider ready");
    Ok(provider)
}

/// Fetch `[start, end]` for `symbol` and canonicalize it.
pub fn load_bars(
    provider: &dyn DataProvider,
    symbol: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<LoadedBars, DataError> {
    let fetched = provider.fetch(symbol, start, end)?;
    let raw = fetched.bars.len();
    let ingested = ingest(symbol, fetched.bars)?;

    if ingested.invalid_dropped > 0 {
        tracing::warn!(
            symbol,
            dropped = ingested.invalid_dropped,
            "discarded invalid bars"
        );
    }
    tracing::debug!(
        symbol,
        provider = provider.name(),
        raw,
        kept = ingested.bars.len(),
        %start,
        %end,
        "bars loaded"
    );

    Ok(LoadedBars {
        symbol: fetched.symbol,
        bars: ingested.bars,
        source: fetched.source,
        duplicates_dropped: ingested.duplicates_dropped,
        invalid_dropped: ingested.invalid_dropped,
    })
}
