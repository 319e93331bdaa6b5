//! Immutable per-request analysis input.

use super::error::AnalysisError;
use super::snapshot::{Reading, Snapshot};
use crate::domain::Bar;
use crate::indicators::IndicatorSeries;

/// Bars plus their indicator series for one symbol, validated once.
///
/// Construction guarantees at least two bars, no void bars, and every
/// indicator series index-aligned with the bars. Nothing mutates it after.
#[derive(Debug, Clone)]
pub struct AnalysisContext {
    symbol: String,
    bars: Vec<Bar>,
    indicators: IndicatorSeries,
}

impl AnalysisContext {
    pub fn new(
        symbol: impl Into<String>,
        bars: Vec<Bar>,
        indicators: IndicatorSeries,
    ) -> Result<Self, AnalysisError> {
        let symbol = symbol.into();

        if bars.len() < 2 {
            return Err(AnalysisError::insufficient(format!(
                "{symbol}: need at least 2 bars, got {}",
                bars.len()
            )));
        }
        if let Some(bar) = bars.iter().find(|b| b.is_void()) {
            return Err(AnalysisError::schema(format!(
                "{symbol}: non-finite OHLC values on {}",
                bar.date
            )));
        }
        if let Some((name, len)) = indicators.misaligned(bars.len()) {
            return Err(AnalysisError::schema(format!(
                "{symbol}: indicator '{name}' has {len} values for {} bars",
                bars.len()
            )));
        }

        Ok(Self {
            symbol,
            bars,
            indicators,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn indicators(&self) -> &IndicatorSeries {
        &self.indicators
    }

    pub fn latest_bar(&self) -> &Bar {
        &self.bars[self.bars.len() - 1]
    }

    pub fn previous_bar(&self) -> &Bar {
        &self.bars[self.bars.len() - 2]
    }

    pub fn current_price(&self) -> f64 {
        self.latest_bar().close
    }

    pub fn snapshot(&self, key: &str) -> Snapshot {
        Snapshot::of(self.indicators.get_series(key))
    }

    /// Latest volume over the mean volume of the trailing `window` bars
    /// (current bar included). Absent with fewer bars or a zero average.
    pub fn volume_ratio(&self, window: usize) -> Reading {
        if window == 0 || self.bars.len() < window {
            return Reading::Absent;
        }
        let tail = &self.bars[self.bars.len() - window..];
        let average = tail.iter().map(|b| b.volume as f64).sum::<f64>() / window as f64;
        if average <= 0.0 {
            return Reading::Absent;
        }
        Reading::from_value(self.latest_bar().volume as f64 / average)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_bars;

    #[test]
    fn rejects_short_history() {
        let err = AnalysisContext::new("X", make_bars(&[10.0]), IndicatorSeries::new())
            .unwrap_err();
        assert!(matches!(err, AnalysisError::InsufficientHistory { .. }));
    }

    #[test]
    fn rejects_misaligned_series() {
        let mut series = IndicatorSeries::new();
        series.insert("rsi", vec![50.0; 2]);
        let err = AnalysisContext::new("X", make_bars(&[1.0, 2.0, 3.0]), series).unwrap_err();
        assert!(matches!(err, AnalysisError::SchemaValidation { .. }));
        assert!(err.to_string().contains("'rsi' has 2 values for 3 bars"));
    }

    #[test]
    fn rejects_void_bars() {
        let mut bars = make_bars(&[1.0, 2.0, 3.0]);
        bars[1].low = f64::NAN;
        let err = AnalysisContext::new("X", bars, IndicatorSeries::new()).unwrap_err();
        assert!(matches!(err, AnalysisError::SchemaValidation { .. }));
    }

    #[test]
    fn volume_ratio_includes_current_bar() {
        let mut bars = make_bars(&[1.0, 2.0, 3.0, 4.0]);
        bars[3].volume = 4000; // window of 4: mean = 7000 / 4
        let ctx = AnalysisContext::new("X", bars, IndicatorSeries::new()).unwrap();
        assert_eq!(ctx.volume_ratio(4), Reading::Present(4000.0 / 1750.0));
        assert_eq!(ctx.volume_ratio(5), Reading::Absent);
    }

    #[test]
    fn zero_volume_window_is_absent() {
        let mut bars = make_bars(&[1.0, 2.0]);
        for bar in &mut bars {
            bar.volume = 0;
        }
        let ctx = AnalysisContext::new("X", bars, IndicatorSeries::new()).unwrap();
        assert_eq!(ctx.volume_ratio(2), Reading::Absent);
    }
}
