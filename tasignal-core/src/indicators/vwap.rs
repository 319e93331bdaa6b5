//! Cumulative VWAP over the loaded window.
//!
//! VWAP[t] = sum(typical_price * volume) / sum(volume) for bars 0..=t.
//! NaN until cumulative volume is positive.

use super::series::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone, Default)]
pub struct Vwap;

impl Vwap {
    pub fn new() -> Self {
        Self
    }
}

impl Indicator for Vwap {
    fn name(&self) -> &str {
        "vwap"
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let mut cum_pv = 0.0;
        let mut cum_vol = 0.0;
        bars.iter()
            .map(|bar| {
                let tp = bar.typical_price();
                if tp.is_finite() {
                    cum_pv += tp * bar.volume as f64;
                    cum_vol += bar.volume as f64;
                }
                if cum_vol > 0.0 {
                    cum_pv / cum_vol
                } else {
                    f64::NAN
                }
            })
            .collect()
    }
}
