//! Display sentinels and the fixed label → colour maps shared with the
//! presentation layer.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// Filter option meaning "no restriction".
pub const ALL: &str = "All";
/// Label for a categorical cell with no value.
pub const NONE: &str = "None";
/// Label for a touch time that never happened.
pub const UNTOUCHED: &str = "Untouched";

pub const GREEN: &str = "#2ecc71";
pub const RED: &str = "#e74c3c";
pub const SLATE: &str = "#5d6d7e";

/// An ordered label → colour map. The order is also the slice order of a pie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    entries: &'static [(&'static str, &'static str)],
}

impl Palette {
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(label, _)| *label)
    }

    pub fn color(&self, label: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, color)| *color)
    }

    pub fn position(&self, label: &str) -> Option<usize> {
        self.entries.iter().position(|(l, _)| *l == label)
    }

    pub fn to_map(&self) -> IndexMap<String, String> {
        self.entries
            .iter()
            .map(|(l, c)| (l.to_string(), c.to_string()))
            .collect()
    }
}

/// Serialised as a label → colour object, in order.
impl Serialize for Palette {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().copied())
    }
}

pub const TRUE_RATE: Palette = Palette::new(&[("True", GREEN), ("False", RED)]);

pub const BOX_COLOR: Palette = Palette::new(&[("Green", GREEN), ("Red", RED), ("Neutral", SLATE)]);

pub const DIRECTION: Palette = Palette::new(&[("Long", GREEN), ("Short", RED), (NONE, SLATE)]);
