//! Indicator trait and the named series container handed to the engine.
//!
//! Indicators are pure functions: bar history in, numeric series out.
//! They are computed once per analysis and never recomputed.

use crate::domain::Bar;
use serde::Serialize;
use std::collections::BTreeMap;

/// Trait for single-series indicators.
///
/// Implementations take the full bar series and return a `Vec<f64>` of the
/// same length. Warm-up positions are `f64::NAN`.
///
/// No value at bar t may depend on bars after t.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "sma_20", "atr_14").
    fn name(&self) -> &str;

    /// Number of bars consumed before the first valid output.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire bar series.
    fn compute(&self, bars: &[Bar]) -> Vec<f64>;
}

/// Named indicator series, each index-aligned with the bar sequence.
///
/// Keys are kept sorted so reports that embed every series are stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IndicatorSeries {
    series: BTreeMap<String, Vec<f64>>,
}

impl IndicatorSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) a named series.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.series.insert(name.into(), values);
    }

    /// Compute `indicator` over `bars` and store it under `key`.
    pub fn insert_computed(&mut self, key: &str, indicator: &dyn Indicator, bars: &[Bar]) {
        tracing::trace!(key, indicator = indicator.name(), "computing indicator");
        self.insert(key, indicator.compute(bars));
    }

    /// Value at a specific bar index. `None` if the series or index is missing.
    pub fn get(&self, name: &str, bar_index: usize) -> Option<f64> {
        self.series
            .get(name)
            .and_then(|v| v.get(bar_index).copied())
    }

    /// Full series for a named indicator.
    pub fn get_series(&self, name: &str) -> Option<&[f64]> {
        self.series.get(name).map(|v| v.as_slice())
    }

    /// Last value of a named series.
    pub fn latest(&self, name: &str) -> Option<f64> {
        self.get_series(name).and_then(|v| v.last().copied())
    }

    /// Iterate series names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(|k| k.as_str())
    }

    /// First series whose length differs from `expected`, as `(name, len)`.
    pub fn misaligned(&self, expected: usize) -> Option<(&str, usize)> {
        self.series
            .iter()
            .find(|(_, v)| v.len() != expected)
            .map(|(k, v)| (k.as_str(), v.len()))
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
