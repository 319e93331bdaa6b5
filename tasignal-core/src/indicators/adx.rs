//! ADX: Average Directional Index (Wilder), with its +DI / -DI components.
//!
//! Steps:
//! 1. Compute +DM and -DM from consecutive bars
//! 2. Smooth +DM, -DM, and TR using Wilder smoothing (alpha = 1/period)
//! 3. +DI = 100 * smoothed(+DM) / smoothed(TR)
//! 4. -DI = 100 * smoothed(-DM) / smoothed(TR)
//! 5. DX = 100 * |+DI - -DI| / (+DI + -DI)
//! 6. ADX = Wilder-smoothed DX
//!
//! Lookback: period for the DI lines, 2 * period - 1 for ADX.

use super::atr::{true_range, wilder_smooth};
use super::series::Indicator;
use crate::domain::Bar;

/// Which directional output to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdxLine {
    Adx,
    PlusDi,
    MinusDi,
}

#[derive(Debug, Clone)]
pub struct Adx {
    period: usize,
    output: AdxLine,
    name: String,
}

/// The three directional series, index-aligned with the bars.
#[derive(Debug, Clone)]
pub struct DirectionalSeries {
    pub adx: Vec<f64>,
    pub plus_di: Vec<f64>,
    pub minus_di: Vec<f64>,
}

impl Adx {
    pub fn new(period: usize) -> Self {
        Self::with_output(period, AdxLine::Adx)
    }

    pub fn with_output(period: usize, output: AdxLine) -> Self {
        assert!(period >= 1, "ADX period must be >= 1");
        let prefix = match output {
            AdxLine::Adx => "adx",
            AdxLine::PlusDi => "plus_di",
            AdxLine::MinusDi => "minus_di",
        };
        Self {
            period,
            output,
            name: format!("{prefix}_{period}"),
        }
    }

    pub fn compute_all(&self, bars: &[Bar]) -> DirectionalSeries {
        let n = bars.len();
        let mut plus_dm = vec![f64::NAN; n];
        let mut minus_dm = vec![f64::NAN; n];

        for (i, pair) in bars.windows(2).enumerate() {
            let up = pair[1].high - pair[0].high;
            let down = pair[0].low - pair[1].low;
            if !(up.is_finite() && down.is_finite()) {
                continue;
            }
            plus_dm[i + 1] = if up > down && up > 0.0 { up } else { 0.0 };
            minus_dm[i + 1] = if down > up && down > 0.0 { down } else { 0.0 };
        }

        let smooth_tr = wilder_smooth(&true_range(bars), self.period);
        let smooth_plus = wilder_smooth(&plus_dm, self.period);
        let smooth_minus = wilder_smooth(&minus_dm, self.period);

        let mut plus_di = vec![f64::NAN; n];
        let mut minus_di = vec![f64::NAN; n];
        let mut dx = vec![f64::NAN; n];
        for i in 0..n {
            let tr = smooth_tr[i];
            if !(tr.is_finite() && smooth_plus[i].is_finite() && smooth_minus[i].is_finite())
                || tr == 0.0
            {
                continue;
            }
            let pdi = 100.0 * smooth_plus[i] / tr;
            let mdi = 100.0 * smooth_minus[i] / tr;
            plus_di[i] = pdi;
            minus_di[i] = mdi;
            let sum = pdi + mdi;
            dx[i] = if sum == 0.0 {
                0.0
            } else {
                100.0 * (pdi - mdi).abs() / sum
            };
        }

        DirectionalSeries {
            adx: wilder_smooth(&dx, self.period),
            plus_di,
            minus_di,
        }
    }
}

impl Indicator for Adx {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        match self.output {
            AdxLine::Adx => 2 * self.period - 1,
            AdxLine::PlusDi | AdxLine::MinusDi => self.period,
        }
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let all = self.compute_all(bars);
        match self.output {
            AdxLine::Adx => all.adx,
            AdxLine::PlusDi => all.plus_di,
            AdxLine::MinusDi => all.minus_di,
        }
    }
}
