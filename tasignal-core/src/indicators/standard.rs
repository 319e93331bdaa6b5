//! The standard indicator set consumed by the signal engine.

use super::adx::Adx;
use super::atr::Atr;
use super::bollinger::Bollinger;
use super::ema::Ema;
use super::keys;
use super::macd::{Macd, MacdLine};
use super::rsi::Rsi;
use super::series::IndicatorSeries;
use super::sma::Sma;
use super::stochastic::{Stochastic, StochasticLine};
use super::vwap::Vwap;
use crate::domain::Bar;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Indicator settings that no indicator constructor would accept.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("{name} must be >= 1")]
    ZeroWindow { name: &'static str },

    #[error("macd_fast ({fast}) must be shorter than macd_slow ({slow})")]
    MacdPeriods { fast: usize, slow: usize },

    #[error("bb_std_dev must be positive, got {0}")]
    BandWidth(f64),
}

/// Window lengths for the standard indicator set.
///
/// Series keys stay fixed regardless of the configured periods: the rule
/// table reads `sma_20` even if it was computed with a different window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorSettings {
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bb_period: usize,
    pub bb_std_dev: f64,
    pub sma_short: usize,
    pub sma_long: usize,
    pub ema_fast: usize,
    pub ema_slow: usize,
    pub stoch_period: usize,
    pub stoch_smooth: usize,
    pub adx_period: usize,
    pub atr_period: usize,
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bb_period: 20,
            bb_std_dev: 2.0,
            sma_short: 20,
            sma_long: 50,
            ema_fast: 12,
            ema_slow: 26,
            stoch_period: 14,
            stoch_smooth: 3,
            adx_period: 14,
            atr_period: 14,
        }
    }
}

impl IndicatorSettings {
    /// Reject zero windows and inverted MACD periods before any indicator
    /// constructor sees them.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let windows = [
            ("rsi_period", self.rsi_period),
            ("macd_fast", self.macd_fast),
            ("macd_signal", self.macd_signal),
            ("bb_period", self.bb_period),
            ("sma_short", self.sma_short),
            ("sma_long", self.sma_long),
            ("ema_fast", self.ema_fast),
            ("ema_slow", self.ema_slow),
            ("stoch_period", self.stoch_period),
            ("stoch_smooth", self.stoch_smooth),
            ("adx_period", self.adx_period),
            ("atr_period", self.atr_period),
        ];
        if let Some(&(name, _)) = windows.iter().find(|(_, v)| *v == 0) {
            return Err(SettingsError::ZeroWindow { name });
        }
        if self.macd_fast >= self.macd_slow {
            return Err(SettingsError::MacdPeriods {
                fast: self.macd_fast,
                slow: self.macd_slow,
            });
        }
        if !(self.bb_std_dev.is_finite() && self.bb_std_dev > 0.0) {
            return Err(SettingsError::BandWidth(self.bb_std_dev));
        }
        Ok(())
    }
}

/// Compute every standard series over `bars`.
///
/// Callers validate `settings` first; invalid windows panic in the
/// indicator constructors.
pub fn compute_standard(bars: &[Bar], settings: &IndicatorSettings) -> IndicatorSeries {
    let mut out = IndicatorSeries::new();
    let s = settings;

    out.insert_computed(keys::RSI, &Rsi::new(s.rsi_period), bars);

    let (line, signal, hist) =
        Macd::new(s.macd_fast, s.macd_slow, s.macd_signal, MacdLine::Line).compute_all(bars);
    out.insert(keys::MACD, line);
    out.insert(keys::MACD_SIGNAL, signal);
    out.insert(keys::MACD_DIFF, hist);

    out.insert_computed(keys::BB_UPPER, &Bollinger::upper(s.bb_period, s.bb_std_dev), bars);
    out.insert_computed(keys::BB_MIDDLE, &Bollinger::middle(s.bb_period, s.bb_std_dev), bars);
    out.insert_computed(keys::BB_LOWER, &Bollinger::lower(s.bb_period, s.bb_std_dev), bars);
    out.insert_computed(keys::BB_WIDTH, &Bollinger::width(s.bb_period, s.bb_std_dev), bars);

    out.insert_computed(keys::SMA_20, &Sma::new(s.sma_short), bars);
    out.insert_computed(keys::SMA_50, &Sma::new(s.sma_long), bars);
    out.insert_computed(keys::EMA_12, &Ema::new(s.ema_fast), bars);
    out.insert_computed(keys::EMA_26, &Ema::new(s.ema_slow), bars);

    let stoch_k = Stochastic::new(s.stoch_period, s.stoch_smooth, StochasticLine::K);
    let stoch_d = Stochastic::new(s.stoch_period, s.stoch_smooth, StochasticLine::D);
    out.insert_computed(keys::STOCH_K, &stoch_k, bars);
    out.insert_computed(keys::STOCH_D, &stoch_d, bars);

    let directional = Adx::new(s.adx_period).compute_all(bars);
    out.insert(keys::ADX, directional.adx);
    out.insert(keys::ADX_POS, directional.plus_di);
    out.insert(keys::ADX_NEG, directional.minus_di);

    out.insert_computed(keys::ATR, &Atr::new(s.atr_period), bars);
    out.insert_computed(keys::VWAP, &Vwap::new(), bars);

    tracing::debug!(bars = bars.len(), series = out.len(), "computed standard indicators");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_bars;

    fn wave(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 100.0 + (i as f64 * 0.3).sin() * 8.0 + i as f64 * 0.1)
            .collect()
    }

    #[test]
    fn computes_every_key_aligned() {
        let bars = make_bars(&wave(80));
        let series = compute_standard(&bars, &IndicatorSettings::default());

        assert_eq!(series.len(), keys::ALL.len());
        for key in keys::ALL {
            let values = series.get_series(key).unwrap_or_else(|| panic!("missing {key}"));
            assert_eq!(values.len(), 80, "{key} misaligned");
            assert!(values[79].is_finite(), "{key} not warmed up after 80 bars");
        }
        assert_eq!(series.misaligned(80), None);
    }

    #[test]
    fn short_history_leaves_long_windows_in_warmup() {
        let bars = make_bars(&wave(30));
        let series = compute_standard(&bars, &IndicatorSettings::default());
        assert!(series.latest(keys::SMA_50).unwrap().is_nan());
        assert!(series.latest(keys::MACD_SIGNAL).unwrap().is_nan());
        assert!(series.latest(keys::SMA_20).unwrap().is_finite());
        assert!(series.latest(keys::VWAP).unwrap().is_finite());
    }

    #[test]
    fn settings_validation() {
        assert!(IndicatorSettings::default().validate().is_ok());

        let inverted = IndicatorSettings {
            macd_fast: 26,
            macd_slow: 12,
            ..Default::default()
        };
        assert_eq!(
            inverted.validate(),
            Err(SettingsError::MacdPeriods { fast: 26, slow: 12 })
        );

        let zero = IndicatorSettings {
            rsi_period: 0,
            ..Default::default()
        };
        let err = zero.validate().unwrap_err();
        assert_eq!(err, SettingsError::ZeroWindow { name: "rsi_period" });
        assert_eq!(err.to_string(), "rsi_period must be >= 1");

        let flat = IndicatorSettings {
            bb_std_dev: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(flat.validate(), Err(SettingsError::BandWidth(_))));
    }

    #[test]
    fn settings_deserialize_partial_toml() {
        let settings: IndicatorSettings = toml::from_str("rsi_period = 7").unwrap();
        assert_eq!(settings.rsi_period, 7);
        assert_eq!(settings.macd_slow, 26);
    }
}
