//! Report types and the assembler helpers that fill them.

use super::context::AnalysisContext;
use super::decision::Recommendation;
use super::error::AnalysisError;
use super::levels::SupportResistance;
use super::rules::SignalTag;
use super::targets::PriceTargets;
use crate::domain::Bar;
use crate::indicators::keys;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The actionable signal for one symbol at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalReport {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub current_price: f64,
    pub recommendation: Recommendation,
    pub confidence: f64,
    pub technical_score: f64,
    pub signals: Vec<SignalTag>,
    pub reasons: Vec<String>,
    pub support_resistance: SupportResistance,
    pub price_targets: PriceTargets,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    pub current_price: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub volume: u64,
    pub change_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Volatility {
    pub atr: Option<f64>,
    pub bb_width: Option<f64>,
}

/// Signal report plus the raw inputs it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullAnalysisReport {
    pub symbol: String,
    pub analysis_date: DateTime<Utc>,
    pub last_bar_date: NaiveDate,
    pub bars_analyzed: usize,
    /// BLAKE3 over the analyzed bars.
    pub dataset_hash: String,
    pub market_data: MarketData,
    /// Latest value of every indicator series, `null` while warming up.
    pub indicators: BTreeMap<String, Option<f64>>,
    pub signals: SignalReport,
    pub volatility: Volatility,
}

impl MarketData {
    /// Latest bar plus the close-to-close change in percent.
    pub fn from_context(ctx: &AnalysisContext) -> Result<Self, AnalysisError> {
        let latest = ctx.latest_bar();
        let prev_close = ctx.previous_bar().close;
        if prev_close == 0.0 {
            return Err(AnalysisError::insufficient(format!(
                "{}: previous close is zero on {}, change percent undefined",
                ctx.symbol(),
                ctx.previous_bar().date
            )));
        }

        Ok(Self {
            current_price: latest.close,
            open: latest.open,
            high: latest.high,
            low: latest.low,
            volume: latest.volume,
            change_percent: (latest.close - prev_close) / prev_close * 100.0,
        })
    }
}

pub(crate) fn latest_indicators(ctx: &AnalysisContext) -> BTreeMap<String, Option<f64>> {
    ctx.indicators()
        .names()
        .map(|name| (name.to_string(), ctx.snapshot(name).latest.value()))
        .collect()
}

pub(crate) fn volatility(ctx: &AnalysisContext) -> Volatility {
    Volatility {
        atr: ctx.snapshot(keys::ATR).latest.value(),
        bb_width: ctx.snapshot(keys::BB_WIDTH).latest.value(),
    }
}

/// Deterministic BLAKE3 fingerprint of a bar sequence.
pub fn dataset_hash(bars: &[Bar]) -> String {
    let mut hasher = blake3::Hasher::new();
    for bar in bars {
        hasher.update(bar.date.to_string().as_bytes());
        hasher.update(&bar.open.to_le_bytes());
        hasher.update(&bar.high.to_le_bytes());
        hasher.update(&bar.low.to_le_bytes());
        hasher.update(&bar.close.to_le_bytes());
        hasher.update(&bar.volume.to_le_bytes());
    }
    hasher.finalize().to_hex().to_string()
}
