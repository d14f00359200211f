//! Sort keys for computed result collections.

use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

/// Column a result collection can be ordered by.
///
/// `Leg` and `Split` are parametrized by a zero-based control index; `FinalLeg`
/// is the synthetic last-control-to-finish leg. The string form round-trips
/// through [`FromStr`]/[`fmt::Display`] so a rendering layer can keep sort state
/// as plain tokens (`"position"`, `"leg-3"`, `"split-0"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Position,
    Time,
    Loss,
    FinalLeg,
    Leg(usize),
    Split(usize),
}

/// Direction toggle for [`SortKey`] ordering.
///
/// Direction only reverses among rows that have a value for the key; rows
/// without one sort last either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// The opposite direction, for click-to-toggle column headers.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

impl FromStr for SortKey {
    type Err = EngineError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "position" => return Ok(SortKey::Position),
            "time" => return Ok(SortKey::Time),
            "loss" => return Ok(SortKey::Loss),
            "final-leg" => return Ok(SortKey::FinalLeg),
            _ => {}
        }
        if let Some(index) = token.strip_prefix("leg-") {
            if let Ok(index) = index.parse::<usize>() {
                return Ok(SortKey::Leg(index));
            }
        }
        if let Some(index) = token.strip_prefix("split-") {
            if let Ok(index) = index.parse::<usize>() {
                return Ok(SortKey::Split(index));
            }
        }
        Err(EngineError::unknown_sort_key(token))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Position => f.write_str("position"),
            SortKey::Time => f.write_str("time"),
            SortKey::Loss => f.write_str("loss"),
            SortKey::FinalLeg => f.write_str("final-leg"),
            SortKey::Leg(index) => write!(f, "leg-{index}"),
            SortKey::Split(index) => write!(f, "split-{index}"),
        }
    }
}
