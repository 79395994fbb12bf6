//! Fixed-cardinality label sets found in the ORB statistics tables.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A CSV cell held text that is not part of the expected label set.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind} label: {value:?}")]
pub struct UnknownLabel {
    /// Which label set was being parsed (e.g. "direction").
    pub kind: &'static str,
    /// The offending text, trimmed.
    pub value: String,
}

/// Breakout / confirmation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Price confirmed above the range.
    Long,
    /// Price confirmed below the range.
    Short,
}

impl Direction {
    /// Every direction, in display order.
    pub const ALL: [Direction; 2] = [Direction::Long, Direction::Short];

    /// Label as it appears in the tables and on charts.
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::Long => "Long",
            Direction::Short => "Short",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Direction::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownLabel {
                kind: "direction",
                value: s.to_string(),
            })
    }
}

/// Colour of the range box (close relative to open over the range window).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BoxColor {
    /// Closed above the open.
    Green,
    /// Closed below the open.
    Red,
    /// Closed at the open.
    Neutral,
}

impl BoxColor {
    /// Every colour, in display order.
    pub const ALL: [BoxColor; 3] = [BoxColor::Green, BoxColor::Red, BoxColor::Neutral];

    /// Label as it appears in the tables and on charts.
    pub const fn as_str(self) -> &'static str {
        match self {
            BoxColor::Green => "Green",
            BoxColor::Red => "Red",
            BoxColor::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for BoxColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BoxColor {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        BoxColor::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownLabel {
                kind: "box color",
                value: s.to_string(),
            })
    }
}
