//! Support/resistance locator.
//!
//! Scans the trailing window for strict local extrema and reduces them to
//! the top distinct levels per side.

use crate::domain::Bar;
use serde::{Deserialize, Serialize};

/// How support levels are ordered before truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportOrdering {
    /// Highest lows first: the supports nearest to a price above them.
    #[default]
    Descending,
    /// Lowest lows first.
    Ascending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelSettings {
    pub window: usize,
    /// Neighbours on each side a bar must strictly exceed.
    pub order: usize,
    pub max_levels: usize,
    pub support_ordering: SupportOrdering,
}

impl Default for LevelSettings {
    fn default() -> Self {
        Self {
            window: 50,
            order: 5,
            max_levels: 3,
            support_ordering: SupportOrdering::Descending,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportResistance {
    pub resistance: Vec<f64>,
    pub support: Vec<f64>,
}

pub fn locate(bars: &[Bar], settings: &LevelSettings) -> SupportResistance {
    let start = bars.len().saturating_sub(settings.window);
    let window = &bars[start..];

    let highs: Vec<f64> = window.iter().map(|b| b.high).collect();
    let lows: Vec<f64> = window.iter().map(|b| b.low).collect();

    let mut resistance = extrema(&highs, settings.order, |v, n| v > n);
    let mut support = extrema(&lows, settings.order, |v, n| v < n);

    resistance.sort_by(|a, b| b.total_cmp(a));
    match settings.support_ordering {
        SupportOrdering::Descending => support.sort_by(|a, b| b.total_cmp(a)),
        SupportOrdering::Ascending => support.sort_by(|a, b| a.total_cmp(b)),
    }
    resistance.dedup();
    support.dedup();
    resistance.truncate(settings.max_levels);
    support.truncate(settings.max_levels);

    SupportResistance {
        resistance,
        support,
    }
}

/// Values at positions strictly beating every neighbour within `order`.
/// Positions closer than `order` to either end never qualify.
fn extrema(values: &[f64], order: usize, beats: impl Fn(f64, f64) -> bool) -> Vec<f64> {
    let n = values.len();
    if order == 0 || n < 2 * order + 1 {
        return Vec::new();
    }
    (order..n - order)
        .filter(|&i| {
            let v = values[i];
            v.is_finite()
                && values[i - order..i].iter().all(|&w| beats(v, w))
                && values[i + 1..=i + order].iter().all(|&w| beats(v, w))
        })
        .map(|i| values[i])
        .collect()
}
