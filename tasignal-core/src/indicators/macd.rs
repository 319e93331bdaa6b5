//! MACD: Moving Average Convergence/Divergence.
//!
//! Three lines (separate Indicator instances):
//! - Line: EMA(close, fast) - EMA(close, slow)
//! - Signal: EMA(line, signal)
//! - Histogram: line - signal
//!
//! Lookback: slow - 1 for the line, slow + signal - 2 for signal and histogram.

use super::ema::ema_of_series;
use super::series::Indicator;
use crate::domain::Bar;

/// Which MACD output to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdLine {
    Line,
    Signal,
    Histogram,
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
    output: MacdLine,
    name: String,
}

impl Macd {
    pub fn new(fast: usize, slow: usize, signal: usize, output: MacdLine) -> Self {
        assert!(fast >= 1 && signal >= 1, "MACD periods must be >= 1");
        assert!(fast < slow, "MACD fast period must be shorter than slow period");
        let suffix = match output {
            MacdLine::Line => "line",
            MacdLine::Signal => "signal",
            MacdLine::Histogram => "hist",
        };
        Self {
            fast,
            slow,
            signal,
            output,
            name: format!("macd_{suffix}_{fast}_{slow}_{signal}"),
        }
    }

    /// Compute all three outputs at once: (line, signal, histogram).
    pub fn compute_all(&self, bars: &[Bar]) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let fast = ema_of_series(&closes, self.fast);
        let slow = ema_of_series(&closes, self.slow);

        let line: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
        let signal = ema_of_series(&line, self.signal);
        let histogram: Vec<f64> = line.iter().zip(&signal).map(|(l, s)| l - s).collect();

        (line, signal, histogram)
    }
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        match self.output {
            MacdLine::Line => self.slow - 1,
            MacdLine::Signal | MacdLine::Histogram => self.slow + self.signal - 2,
        }
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let (line, signal, histogram) = self.compute_all(bars);
        match self.output {
            MacdLine::Line => line,
            MacdLine::Signal => signal,
            MacdLine::Histogram => histogram,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    fn trending_closes(n: usize) -> Vec<f64> {
        (0..n).map(|i| 100.0 + i as f64 * 0.5).collect()
    }

    #[test]
    fn macd_warmup_matches_lookback() {
        let bars = make_bars(&trending_closes(40));
        for output in [MacdLine::Line, MacdLine::Signal, MacdLine::Histogram] {
            let macd = Macd::new(3, 6, 4, output);
            let result = macd.compute(&bars);
            let lookback = macd.lookback();
            assert!(result[lookback - 1].is_nan(), "{output:?} valid before lookback");
            assert!(result[lookback].is_finite(), "{output:?} invalid at lookback");
        }
    }

    #[test]
    fn macd_positive_in_uptrend() {
        let bars = make_bars(&trending_closes(40));
        let (line, _, _) = Macd::new(3, 6, 4, MacdLine::Line).compute_all(&bars);
        assert!(line[39] > 0.0);
    }

    #[test]
    fn histogram_is_line_minus_signal() {
        let closes: Vec<f64> = (0..50).map(|i| 100.0 + (i as f64 * 0.4).sin() * 5.0).collect();
        let bars = make_bars(&closes);
        let (line, signal, hist) = Macd::new(12, 26, 9, MacdLine::Line).compute_all(&bars);
        for i in 34..50 {
            assert_approx(hist[i], line[i] - signal[i], DEFAULT_EPSILON);
        }
    }

    #[test]
    fn macd_lookback_standard() {
        assert_eq!(Macd::new(12, 26, 9, MacdLine::Line).lookback(), 25);
        assert_eq!(Macd::new(12, 26, 9, MacdLine::Signal).lookback(), 33);
    }
}
