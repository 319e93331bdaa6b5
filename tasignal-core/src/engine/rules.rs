//! Rule evaluator: a fixed, ordered table of independent scoring rules.
//!
//! Each rule names its inputs, a predicate over their values, a score delta,
//! an optional tag and an optional reason template. A rule abstains when any
//! input reading is absent; otherwise, if its predicate holds, it adds its
//! delta and appends its tag and reason when it has them. MACD polarity only
//! moves the score.
//!
//! Two-sided conditions ("above, else below") are two rows whose predicates
//! are complements, so exactly one of them fires when the inputs are present.

use super::context::AnalysisContext;
use super::snapshot::Reading;
use crate::indicators::keys;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rationale tags carried in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalTag {
    RsiOversold,
    RsiLow,
    RsiOverbought,
    RsiHigh,
    MacdBullishCross,
    MacdBearishCross,
    PriceAboveSma20,
    PriceBelowSma20,
    GoldenCross,
    DeathCross,
    PriceBelowBbLower,
    PriceAboveBbUpper,
    StochOversold,
    StochOverbought,
}

impl SignalTag {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RsiOversold => "RSI_OVERSOLD",
            Self::RsiLow => "RSI_LOW",
            Self::RsiOverbought => "RSI_OVERBOUGHT",
            Self::RsiHigh => "RSI_HIGH",
            Self::MacdBullishCross => "MACD_BULLISH_CROSS",
            Self::MacdBearishCross => "MACD_BEARISH_CROSS",
            Self::PriceAboveSma20 => "PRICE_ABOVE_SMA20",
            Self::PriceBelowSma20 => "PRICE_BELOW_SMA20",
            Self::GoldenCross => "GOLDEN_CROSS",
            Self::DeathCross => "DEATH_CROSS",
            Self::PriceBelowBbLower => "PRICE_BELOW_BB_LOWER",
            Self::PriceAboveBbUpper => "PRICE_ABOVE_BB_UPPER",
            Self::StochOversold => "STOCH_OVERSOLD",
            Self::StochOverbought => "STOCH_OVERBOUGHT",
        }
    }
}

impl fmt::Display for SignalTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a rule input comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Latest value of an indicator series.
    Latest(&'static str),
    /// Second-latest value of an indicator series.
    Previous(&'static str),
    /// Latest close.
    Price,
    /// Latest volume over its trailing average.
    VolumeRatio,
}

/// One row of the rule table. `predicate` and `reason` receive the input
/// values in the order `inputs` lists them. Rows without a reason are silent.
#[derive(Clone)]
pub struct Rule {
    pub name: &'static str,
    pub inputs: Vec<Input>,
    pub predicate: fn(&[f64]) -> bool,
    pub delta: f64,
    pub tag: Option<SignalTag>,
    pub reason: Option<fn(&[f64]) -> String>,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("inputs", &self.inputs)
            .field("delta", &self.delta)
            .field("tag", &self.tag)
            .field("has_reason", &self.reason.is_some())
            .finish()
    }
}

/// Tunables for rule inputs that are not indicator series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSettings {
    /// Bars in the volume average, current bar included.
    pub volume_window: usize,
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self { volume_window: 20 }
    }
}

/// Accumulated result of one pass over the table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    pub score: f64,
    pub signals: Vec<SignalTag>,
    pub reasons: Vec<String>,
    /// Names of the rules that fired, in table order.
    pub fired: Vec<&'static str>,
}

/// The ordered rule table.
#[derive(Debug, Clone)]
pub struct RuleBook {
    rules: Vec<Rule>,
}

const MACD_INPUTS: [Input; 4] = [
    Input::Previous(keys::MACD),
    Input::Previous(keys::MACD_SIGNAL),
    Input::Latest(keys::MACD),
    Input::Latest(keys::MACD_SIGNAL),
];

const BOLLINGER_INPUTS: [Input; 4] = [
    Input::Price,
    Input::Latest(keys::BB_LOWER),
    Input::Latest(keys::BB_UPPER),
    Input::Latest(keys::BB_MIDDLE),
];

impl RuleBook {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The standard table, in evaluation order.
    pub fn standard() -> Self {
        let rsi = || vec![Input::Latest(keys::RSI)];
        let price_sma = || vec![Input::Price, Input::Latest(keys::SMA_20)];
        let sma_pair = || vec![Input::Latest(keys::SMA_20), Input::Latest(keys::SMA_50)];
        let stoch = || vec![Input::Latest(keys::STOCH_K), Input::Latest(keys::STOCH_D)];

        Self::new(vec![
            Rule {
                name: "rsi_oversold",
                inputs: rsi(),
                predicate: |v| v[0] < 30.0,
                delta: 2.0,
                tag: Some(SignalTag::RsiOversold),
                reason: Some(|v| format!("RSI oversold ({:.1} < 30), strong buy signal", v[0])),
            },
            Rule {
                name: "rsi_low",
                inputs: rsi(),
                predicate: |v| (30.0..40.0).contains(&v[0]),
                delta: 1.0,
                tag: Some(SignalTag::RsiLow),
                reason: Some(|v| format!("RSI low ({:.1}), upside likely", v[0])),
            },
            Rule {
                name: "rsi_overbought",
                inputs: rsi(),
                predicate: |v| v[0] > 70.0,
                delta: -2.0,
                tag: Some(SignalTag::RsiOverbought),
                reason: Some(|v| format!("RSI overbought ({:.1} > 70), correction risk", v[0])),
            },
            Rule {
                name: "rsi_high",
                inputs: rsi(),
                predicate: |v| v[0] > 60.0 && v[0] <= 70.0,
                delta: -1.0,
                tag: Some(SignalTag::RsiHigh),
                reason: Some(|v| format!("RSI high ({:.1}), caution", v[0])),
            },
            Rule {
                name: "macd_bullish_cross",
                inputs: MACD_INPUTS.to_vec(),
                predicate: |v| v[0] <= v[1] && v[2] > v[3],
                delta: 2.0,
                tag: Some(SignalTag::MacdBullishCross),
                reason: Some(|v| format!("MACD crossed above signal ({:.3} > {:.3})", v[2], v[3])),
            },
            Rule {
                name: "macd_bearish_cross",
                inputs: MACD_INPUTS.to_vec(),
                predicate: |v| v[0] >= v[1] && v[2] < v[3],
                delta: -2.0,
                tag: Some(SignalTag::MacdBearishCross),
                reason: Some(|v| format!("MACD crossed below signal ({:.3} < {:.3})", v[2], v[3])),
            },
            Rule {
                name: "macd_positive",
                inputs: MACD_INPUTS.to_vec(),
                predicate: |v| v[2] > 0.0,
                delta: 0.5,
                tag: None,
                reason: None,
            },
            Rule {
                name: "macd_non_positive",
                inputs: MACD_INPUTS.to_vec(),
                predicate: |v| v[2] <= 0.0,
                delta: -0.5,
                tag: None,
                reason: None,
            },
            Rule {
                name: "price_above_sma20",
                inputs: price_sma(),
                predicate: |v| v[0] > v[1],
                delta: 1.0,
                tag: Some(SignalTag::PriceAboveSma20),
                reason: Some(|v| format!("Price above SMA20 ({:.1}), short-term uptrend", v[1])),
            },
            Rule {
                name: "price_below_sma20",
                inputs: price_sma(),
                predicate: |v| v[0] <= v[1],
                delta: -1.0,
                tag: Some(SignalTag::PriceBelowSma20),
                reason: Some(|v| format!("Price below SMA20 ({:.1}), short-term downtrend", v[1])),
            },
            Rule {
                name: "golden_cross",
                inputs: sma_pair(),
                predicate: |v| v[0] > v[1],
                delta: 1.0,
                tag: Some(SignalTag::GoldenCross),
                reason: Some(|v| format!("SMA20 {:.1} > SMA50 {:.1}, golden cross", v[0], v[1])),
            },
            Rule {
                name: "death_cross",
                inputs: sma_pair(),
                predicate: |v| v[0] <= v[1],
                delta: -1.0,
                tag: Some(SignalTag::DeathCross),
                reason: Some(|v| format!("SMA20 {:.1} <= SMA50 {:.1}, death cross", v[0], v[1])),
            },
            Rule {
                name: "price_below_bb_lower",
                inputs: BOLLINGER_INPUTS.to_vec(),
                predicate: |v| v[0] < v[1],
                delta: 1.5,
                tag: Some(SignalTag::PriceBelowBbLower),
                reason: Some(|v| {
                    format!("Price below lower Bollinger band ({:.1}), oversold", v[1])
                }),
            },
            Rule {
                name: "price_above_bb_upper",
                inputs: BOLLINGER_INPUTS.to_vec(),
                predicate: |v| v[0] >= v[1] && v[0] > v[2],
                delta: -1.5,
                tag: Some(SignalTag::PriceAboveBbUpper),
                reason: Some(|v| {
                    format!("Price above upper Bollinger band ({:.1}), overbought", v[2])
                }),
            },
            Rule {
                name: "stoch_oversold",
                inputs: stoch(),
                predicate: |v| v[0] < 20.0 && v[1] < 20.0,
                delta: 1.0,
                tag: Some(SignalTag::StochOversold),
                reason: Some(|v| format!("Stochastic oversold (%K {:.1}), buy signal", v[0])),
            },
            Rule {
                name: "stoch_overbought",
                inputs: stoch(),
                predicate: |v| v[0] > 80.0 && v[1] > 80.0,
                delta: -1.0,
                tag: Some(SignalTag::StochOverbought),
                reason: Some(|v| format!("Stochastic overbought (%K {:.1}), sell signal", v[0])),
            },
            Rule {
                name: "adx_trending",
                inputs: vec![Input::Latest(keys::ADX)],
                predicate: |v| v[0] > 25.0,
                delta: 0.0,
                tag: None,
                reason: Some(|v| format!("ADX {:.1}, strong trend", v[0])),
            },
            Rule {
                name: "adx_sideways",
                inputs: vec![Input::Latest(keys::ADX)],
                predicate: |v| v[0] <= 25.0,
                delta: 0.0,
                tag: None,
                reason: Some(|v| format!("ADX {:.1}, sideways market", v[0])),
            },
            Rule {
                name: "volume_surge",
                inputs: vec![Input::VolumeRatio],
                predicate: |v| v[0] > 1.5,
                delta: 0.5,
                tag: None,
                reason: Some(|v| format!("Volume {:.1}x average, strong money flow", v[0])),
            },
            Rule {
                name: "volume_dry",
                inputs: vec![Input::VolumeRatio],
                predicate: |v| v[0] < 0.5,
                delta: -0.5,
                tag: None,
                reason: Some(|v| format!("Volume {:.1}x average, weak money flow", v[0])),
            },
        ])
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Run every rule in order against `ctx`.
    pub fn evaluate(&self, ctx: &AnalysisContext, settings: &RuleSettings) -> Evaluation {
        let mut eval = Evaluation::default();
        let mut values = Vec::with_capacity(4);

        for rule in &self.rules {
            values.clear();
            let mut present = true;
            for input in &rule.inputs {
                match resolve(ctx, settings, *input) {
                    Reading::Present(v) => values.push(v),
                    Reading::Absent => {
                        present = false;
                        break;
                    }
                }
            }
            if !present {
                tracing::trace!(rule = rule.name, "abstained: missing input");
                continue;
            }
            if !(rule.predicate)(&values) {
                continue;
            }

            tracing::debug!(rule = rule.name, delta = rule.delta, "rule fired");
            eval.score += rule.delta;
            if let Some(tag) = rule.tag {
                eval.signals.push(tag);
            }
            if let Some(reason) = rule.reason {
                eval.reasons.push(reason(&values));
            }
            eval.fired.push(rule.name);
        }

        eval
    }
}

impl Default for RuleBook {
    fn default() -> Self {
        Self::standard()
    }
}

fn resolve(ctx: &AnalysisContext, settings: &RuleSettings, input: Input) -> Reading {
    match input {
        Input::Latest(key) => ctx.snapshot(key).latest,
        Input::Previous(key) => ctx.snapshot(key).previous,
        Input::Price => Reading::from_value(ctx.current_price()),
        Input::VolumeRatio => ctx.volume_ratio(settings.volume_window),
    }
}
