//! tasignal core: domain types, indicator library, market data, signal engine.
//!
//! - Domain types (bars, symbols)
//! - Indicator library producing a keyed, bar-aligned `IndicatorSeries`
//! - Market-data providers (Yahoo Finance, CSV, synthetic) and the ingest pipeline
//! - Signal engine: rule fusion, decision mapping, support/resistance, price targets

pub mod data;
pub mod domain;
pub mod engine;
pub mod indicators;

pub use domain::{normalize_symbol, Bar};
pub use engine::{
    AnalysisContext, AnalysisError, EngineSettings, FullAnalysisReport, Recommendation,
    SignalEngine, SignalReport,
};
pub use indicators::{compute_standard, IndicatorSeries, IndicatorSettings};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: everything the batch runner moves across
    /// threads is Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::Bar>();
        require_sync::<domain::Bar>();
        require_send::<IndicatorSeries>();
        require_sync::<IndicatorSeries>();
        require_send::<AnalysisContext>();
        require_sync::<AnalysisContext>();
        require_send::<SignalEngine>();
        require_sync::<SignalEngine>();
        require_send::<FullAnalysisReport>();
        require_sync::<FullAnalysisReport>();
        require_send::<AnalysisError>();
        require_sync::<AnalysisError>();
        require_send::<data::DataError>();
        require_sync::<data::DataError>();
        require_sync::<data::YahooProvider>();
        require_sync::<data::CsvProvider>();
        require_sync::<data::SyntheticProvider>();
    }

    /// The engine consumes indicator series but never computes them:
    /// `generate_signals` takes only a context and a timestamp.
    #[test]
    fn engine_reads_precomputed_indicators_only() {
        fn _check(
            engine: &SignalEngine,
            ctx: &AnalysisContext,
            at: chrono::DateTime<chrono::Utc>,
        ) -> Result<SignalReport, AnalysisError> {
            engine.generate_signals(ctx, at)
        }
    }
}
