//! Decision mapper: technical score to recommendation and confidence.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound on any reported confidence.
pub const MAX_CONFIDENCE: f64 = 0.95;

/// Ordered from most bearish to most bullish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "STRONG SELL")]
    StrongSell,
    #[serde(rename = "SELL")]
    Sell,
    #[serde(rename = "HOLD")]
    Hold,
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "STRONG BUY")]
    StrongBuy,
}

impl Recommendation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StrongSell => "STRONG SELL",
            Self::Sell => "SELL",
            Self::Hold => "HOLD",
            Self::Buy => "BUY",
            Self::StrongBuy => "STRONG BUY",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub recommendation: Recommendation,
    pub confidence: f64,
}

/// Piecewise map, first matching band from the top wins.
pub fn map_score(score: f64) -> Decision {
    let (recommendation, confidence) = if score >= 4.0 {
        (Recommendation::StrongBuy, (0.70 + (score - 4.0) * 0.05).min(0.95))
    } else if score >= 2.0 {
        (Recommendation::Buy, (0.60 + (score - 2.0) * 0.05).min(0.85))
    } else if score >= -2.0 {
        (Recommendation::Hold, 0.50 + score.abs() * 0.05)
    } else if score >= -4.0 {
        (Recommendation::Sell, (0.60 + (score + 2.0).abs() * 0.05).min(0.85))
    } else {
        (Recommendation::StrongSell, (0.70 + (score + 4.0).abs() * 0.05).min(0.95))
    };

    Decision {
        recommendation,
        confidence: confidence.clamp(0.0, MAX_CONFIDENCE),
    }
}
