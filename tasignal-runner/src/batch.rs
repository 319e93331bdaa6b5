//! Batch analysis across many symbols.
//!
//! Each symbol is fetched and analyzed independently on a bounded Rayon
//! pool. One symbol failing never affects the others: failures are kept
//! with their cause and returned next to the successful reports.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use std::collections::BTreeMap;
use tasignal_core::data::DataProvider;
use tasignal_core::engine::FullAnalysisReport;

use crate::config::AnalysisConfig;
use crate::runner::{analyze_symbol, RunError};

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchResult {
    /// Successful reports keyed by normalized symbol.
    pub reports: BTreeMap<String, FullAnalysisReport>,
    /// Per-symbol failures in input order.
    pub failures: Vec<RunError>,
}

impl BatchResult {
    pub fn attempted(&self) -> usize {
        self.reports.len() + self.failures.len()
    }

    /// True when symbols were requested and none produced a report.
    pub fn all_failed(&self) -> bool {
        self.reports.is_empty() && !self.failures.is_empty()
    }
}

/// Analyze `symbols` with at most `config.batch.max_parallel` in flight.
///
/// Only configuration and pool setup errors are returned as `Err`.
pub fn analyze_batch(
    symbols: &[String],
    config: &AnalysisConfig,
    provider: &dyn DataProvider,
    as_of: DateTime<Utc>,
) -> Result<BatchResult, RunError> {
    config.validate()?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.batch.max_parallel.min(symbols.len().max(1)))
        .build()?;

    tracing::info!(
        symbols = symbols.len(),
        max_parallel = config.batch.max_parallel,
        "starting batch"
    );

    let outcomes: Vec<Result<FullAnalysisReport, RunError>> = pool.install(|| {
        symbols
            .par_iter()
            .map(|symbol| analyze_symbol(symbol, config, provider, as_of))
            .collect()
    });

    let mut result = BatchResult::default();
    for outcome in outcomes {
        match outcome {
            Ok(report) => {
                result.reports.insert(report.symbol.clone(), report);
            }
            Err(err) => {
                tracing::warn!(error = %err, "symbol failed");
                result.failures.push(err);
            }
        }
    }

    tracing::info!(
        succeeded = result.reports.len(),
        failed = result.failures.len(),
        "batch complete"
    );
    Ok(result)
}
