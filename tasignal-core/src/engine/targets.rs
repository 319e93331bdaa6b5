//! Price target synthesizer: band, moving-average and Fibonacci levels.

use super::context::AnalysisContext;
use crate::indicators::keys;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Retracement ratios, ascending, with their report keys.
pub const FIB_RATIOS: [(&str, f64); 5] = [
    ("0.236", 0.236),
    ("0.382", 0.382),
    ("0.500", 0.500),
    ("0.618", 0.618),
    ("0.786", 0.786),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetSettings {
    /// Trailing bars for the recent high/low range.
    pub range_window: usize,
}

impl Default for TargetSettings {
    fn default() -> Self {
        Self { range_window: 20 }
    }
}

/// Targets and stops. Band and MA fields are `None` during warm-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTargets {
    pub current: f64,
    pub short_term_target: Option<f64>,
    pub short_term_stop: Option<f64>,
    pub medium_term_target: f64,
    pub medium_term_stop: Option<f64>,
    pub fibonacci_levels: BTreeMap<String, f64>,
}

pub fn synthesize(ctx: &AnalysisContext, settings: &TargetSettings) -> PriceTargets {
    let bars = ctx.bars();
    let window = settings.range_window.max(1);
    let recent = &bars[bars.len().saturating_sub(window)..];

    let high = recent.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
    let low = recent.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);

    PriceTargets {
        current: ctx.current_price(),
        short_term_target: ctx.snapshot(keys::BB_UPPER).latest.value(),
        short_term_stop: ctx.snapshot(keys::BB_LOWER).latest.value(),
        medium_term_target: high,
        medium_term_stop: ctx.snapshot(keys::SMA_20).latest.value(),
        fibonacci_levels: fibonacci_ladder(low, high),
    }
}

/// `low + (high - low) * ratio` for every ratio in `FIB_RATIOS`.
pub fn fibonacci_ladder(low: f64, high: f64) -> BTreeMap<String, f64> {
    let diff = high - low;
    FIB_RATIOS
        .iter()
        .map(|&(key, ratio)| (key.to_string(), low + diff * ratio))
        .collect()
}
