//! Single-symbol runner: wires data loading, indicators and the engine.
//!
//! `analyze_symbol` is the one entry point; the batch runner and the CLI
//! both go through it.

use chrono::{DateTime, Duration, Utc};
use tasignal_core::data::DataProvider;
use tasignal_core::domain::{normalize_symbol, SymbolError};
use tasignal_core::engine::{AnalysisContext, AnalysisError, FullAnalysisReport, SignalEngine};
use tasignal_core::indicators::compute_standard;
use thiserror::Error;

use crate::config::{AnalysisConfig, ConfigError};
use crate::data_loader::load_bars;

/// Errors from the runner. Per-symbol variants always carry the symbol.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid symbol '{symbol}': {source}")]
    InvalidSymbol {
        symbol: String,
        #[source]
        source: SymbolError,
    },

    #[error("{symbol}: {source}")]
    Analysis {
        symbol: String,
        #[source]
        source: AnalysisError,
    },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl RunError {
    /// The symbol this failure belongs to, if it is a per-symbol failure.
    pub fn symbol(&self) -> Option<&str> {
        match self {
            Self::InvalidSymbol { symbol, .. } | Self::Analysis { symbol, .. } => Some(symbol),
            Self::Config(_) | Self::ThreadPool(_) => None,
        }
    }
}

/// Analyze one symbol over `[as_of - lookback_days, as_of]`.
///
/// Any fatal error aborts the analysis; no partial report is returned.
pub fn analyze_symbol(
    symbol: &str,
    config: &AnalysisConfig,
    provider: &dyn DataProvider,
    as_of: DateTime<Utc>,
) -> Result<FullAnalysisReport, RunError> {
    config.validate()?;
    let symbol = normalize_symbol(symbol).map_err(|source| RunError::InvalidSymbol {
        symbol: symbol.to_string(),
        source,
    })?;
    let fail = |source: AnalysisError| RunError::Analysis {
        symbol: symbol.clone(),
        source,
    };

    let end = as_of.date_naive();
    let start = end - Duration::days(i64::from(config.data.lookback_days));
    tracing::info!(%symbol, %start, %end, provider = provider.name(), "analyzing");

    let loaded = load_bars(provider, &symbol, start, end).map_err(|e| fail(e.into()))?;
    let series = compute_standard(&loaded.bars, &config.indicators);
    let ctx = AnalysisContext::new(symbol.as_str(), loaded.bars, series).map_err(fail)?;

    let engine = SignalEngine::new(config.engine_settings());
    let report = engine.full_analysis(&ctx, as_of).map_err(fail)?;

    tracing::info!(
        %symbol,
        recommendation = %report.signals.recommendation,
        score = report.signals.technical_score,
        confidence = report.signals.confidence,
        bars = report.bars_analyzed,
        "analysis complete"
    );
    Ok(report)
}
