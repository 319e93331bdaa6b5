//! Indicator library.
//!
//! Every indicator implements the single-series `Indicator` trait and is
//! computed once per analysis. Multi-output indicators (MACD, Bollinger,
//! Stochastic, ADX) are exposed as separate named instances per line, with a
//! `compute_all` helper where the lines share intermediate work.
//!
//! `compute_standard` builds the full keyed `IndicatorSeries` the signal
//! engine consumes.

pub mod adx;
pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod series;
pub mod sma;
pub mod standard;
pub mod stochastic;
pub mod vwap;

pub use adx::{Adx, AdxLine};
pub use atr::Atr;
pub use bollinger::{Bollinger, BollingerBand};
pub use ema::Ema;
pub use macd::{Macd, MacdLine};
pub use rsi::Rsi;
pub use series::{Indicator, IndicatorSeries};
pub use sma::Sma;
pub use standard::{compute_standard, IndicatorSettings, SettingsError};
pub use stochastic::{Stochastic, StochasticLine};
pub use vwap::Vwap;

/// Series keys in the standard indicator set.
pub mod keys {
    pub const RSI: &str = "rsi";
    pub const MACD: &str = "macd";
    pub const MACD_SIGNAL: &str = "macd_signal";
    pub const MACD_DIFF: &str = "macd_diff";
    pub const BB_UPPER: &str = "bb_upper";
    pub const BB_LOWER: &str = "bb_lower";
    pub const BB_MIDDLE: &str = "bb_middle";
    pub const BB_WIDTH: &str = "bb_width";
    pub const SMA_20: &str = "sma_20";
    pub const SMA_50: &str = "sma_50";
    pub const EMA_12: &str = "ema_12";
    pub const EMA_26: &str = "ema_26";
    pub const STOCH_K: &str = "stoch_k";
    pub const STOCH_D: &str = "stoch_d";
    pub const ADX: &str = "adx";
    pub const ADX_POS: &str = "adx_pos";
    pub const ADX_NEG: &str = "adx_neg";
    pub const ATR: &str = "atr";
    pub const VWAP: &str = "vwap";

    pub const ALL: [&str; 19] = [
        RSI,
        MACD,
        MACD_SIGNAL,
        MACD_DIFF,
        BB_UPPER,
        BB_LOWER,
        BB_MIDDLE,
        BB_WIDTH,
        SMA_20,
        SMA_50,
        EMA_12,
        EMA_26,
        STOCH_K,
        STOCH_D,
        ADX,
        ADX_POS,
        ADX_NEG,
        ATR,
        VWAP,
    ];
}

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLV: open = prev_close (or close for first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<crate::domain::Bar> {
    use crate::domain::Bar;
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
