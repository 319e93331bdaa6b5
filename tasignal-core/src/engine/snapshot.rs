//! Latest / previous readings of an indicator series.

use serde::{Serialize, Serializer};

/// One indicator value at one bar: present and finite, or absent.
///
/// NaN and infinities never leave this module as numbers, so rule
/// predicates only ever compare real values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    Present(f64),
    Absent,
}

impl Reading {
    pub fn from_value(value: f64) -> Self {
        if value.is_finite() {
            Self::Present(value)
        } else {
            Self::Absent
        }
    }

    pub fn from_option(value: Option<f64>) -> Self {
        value.map_or(Self::Absent, Self::from_value)
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Self::Present(v) => Some(v),
            Self::Absent => None,
        }
    }

    pub fn is_present(self) -> bool {
        matches!(self, Self::Present(_))
    }
}

/// Serialized as the number or `null`.
impl Serialize for Reading {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value().serialize(serializer)
    }
}

/// The two most recent readings of a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub latest: Reading,
    pub previous: Reading,
}

impl Snapshot {
    pub const ABSENT: Snapshot = Snapshot {
        latest: Reading::Absent,
        previous: Reading::Absent,
    };

    /// Snapshot of `series`; a missing series or a short one reads as absent.
    pub fn of(series: Option<&[f64]>) -> Self {
        let Some(values) = series else {
            return Self::ABSENT;
        };
        let n = values.len();
        Self {
            latest: Reading::from_option(n.checked_sub(1).map(|i| values[i])),
            previous: Reading::from_option(n.checked_sub(2).map(|i| values[i])),
        }
    }
}
