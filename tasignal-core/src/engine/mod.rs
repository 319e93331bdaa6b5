//! Signal engine: fuses indicator readings into one point-in-time report.
//!
//! Per request:
//!
//! 1. Rule evaluator: ordered rule table over the latest readings → score, tags, reasons
//! 2. Decision mapper: score → recommendation + confidence
//! 3. Support/resistance locator over the trailing price window
//! 4. Price target synthesizer: bands, SMA20 and the Fibonacci ladder
//! 5. Report assembler: everything above plus market data
//!
//! The engine does no I/O and never computes indicators; it reads the
//! `IndicatorSeries` carried by an already-validated `AnalysisContext`.

pub mod context;
pub mod decision;
pub mod error;
pub mod levels;
pub mod report;
pub mod rules;
pub mod snapshot;
pub mod targets;

pub use context::AnalysisContext;
pub use decision::{map_score, Decision, Recommendation, MAX_CONFIDENCE};
pub use error::AnalysisError;
pub use levels::{locate, LevelSettings, SupportOrdering, SupportResistance};
pub use report::{dataset_hash, FullAnalysisReport, MarketData, SignalReport, Volatility};
pub use rules::{Evaluation, Input, Rule, RuleBook, RuleSettings, SignalTag};
pub use snapshot::{Reading, Snapshot};
pub use targets::{fibonacci_ladder, synthesize, PriceTargets, TargetSettings, FIB_RATIOS};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Engine tunables. Every section falls back to its defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub levels: LevelSettings,
    pub targets: TargetSettings,
    pub rules: RuleSettings,
}

/// Stateless apart from its settings and rule table; one engine can serve
/// any number of contexts, from any number of threads.
#[derive(Debug, Clone)]
pub struct SignalEngine {
    settings: EngineSettings,
    rules: RuleBook,
}

impl SignalEngine {
    pub fn new(settings: EngineSettings) -> Self {
        Self::with_rules(settings, RuleBook::standard())
    }

    pub fn with_rules(settings: EngineSettings, rules: RuleBook) -> Self {
        Self { settings, rules }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Score, decide, locate levels and synthesize targets.
    ///
    /// Fails on the same conditions as `full_analysis` so a caller never
    /// gets a signal for history the full report would reject.
    pub fn generate_signals(
        &self,
        ctx: &AnalysisContext,
        timestamp: DateTime<Utc>,
    ) -> Result<SignalReport, AnalysisError> {
        MarketData::from_context(ctx)?;
        Ok(self.signals_unchecked(ctx, timestamp))
    }

    /// Signal report plus market data, every latest indicator value,
    /// volatility and the dataset fingerprint.
    pub fn full_analysis(
        &self,
        ctx: &AnalysisContext,
        timestamp: DateTime<Utc>,
    ) -> Result<FullAnalysisReport, AnalysisError> {
        let market_data = MarketData::from_context(ctx)?;
        let signals = self.signals_unchecked(ctx, timestamp);

        Ok(FullAnalysisReport {
            symbol: ctx.symbol().to_string(),
            analysis_date: timestamp,
            last_bar_date: ctx.latest_bar().date,
            bars_analyzed: ctx.bars().len(),
            dataset_hash: dataset_hash(ctx.bars()),
            market_data,
            indicators: report::latest_indicators(ctx),
            signals,
            volatility: report::volatility(ctx),
        })
    }

    fn signals_unchecked(&self, ctx: &AnalysisContext, timestamp: DateTime<Utc>) -> SignalReport {
        let eval = self.rules.evaluate(ctx, &self.settings.rules);
        let decision = map_score(eval.score);
        let levels = locate(ctx.bars(), &self.settings.levels);
        let targets = synthesize(ctx, &self.settings.targets);

        tracing::debug!(
            symbol = ctx.symbol(),
            score = eval.score,
            recommendation = %decision.recommendation,
            fired = eval.fired.len(),
            "signals generated"
        );

        SignalReport {
            symbol: ctx.symbol().to_string(),
            timestamp,
            current_price: ctx.current_price(),
            recommendation: decision.recommendation,
            confidence: decision.confidence,
            technical_score: eval.score,
            signals: eval.signals,
            reasons: eval.reasons,
            support_resistance: levels,
            price_targets: targets,
        }
    }
}

impl Default for SignalEngine {
    fn default() -> Self {
        Self::new(EngineSettings::default())
    }
}
