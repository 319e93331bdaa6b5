//! Stochastic Oscillator.
//!
//! %K = 100 * (close - lowest_low) / (highest_high - lowest_low) over `period` bars.
//! %D = SMA(%K, smooth).
//! A flat window (highest == lowest) yields NaN.
//! Lookback: period - 1 for %K, period + smooth - 2 for %D.

use super::series::Indicator;
use super::sma::sma_of_series;
use crate::domain::Bar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StochasticLine {
    K,
    D,
}

#[derive(Debug, Clone)]
pub struct Stochastic {
    period: usize,
    smooth: usize,
    line: StochasticLine,
    name: String,
}

impl Stochastic {
    pub fn new(period: usize, smooth: usize, line: StochasticLine) -> Self {
        assert!(period >= 1 && smooth >= 1, "Stochastic periods must be >= 1");
        let label = match line {
            StochasticLine::K => "k",
            StochasticLine::D => "d",
        };
        Self {
            period,
            smooth,
            line,
            name: format!("stoch_{label}_{period}_{smooth}"),
        }
    }

    fn percent_k(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut k = vec![f64::NAN; n];
        if n < self.period {
            return k;
        }
        for i in (self.period - 1)..n {
            let window = &bars[(i + 1 - self.period)..=i];
            let highest = window.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
            let lowest = window.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
            let range = highest - lowest;
            if range.is_finite() && range > 0.0 && bars[i].close.is_finite() {
                k[i] = 100.0 * (bars[i].close - lowest) / range;
            }
        }
        k
    }
}

impl Indicator for Stochastic {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        match self.line {
            StochasticLine::K => self.period - 1,
            StochasticLine::D => self.period + self.smooth - 2,
        }
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let k = self.percent_k(bars);
        match self.line {
            StochasticLine::K => k,
            StochasticLine::D => sma_of_series(&k, self.smooth),
        }
    }
}
