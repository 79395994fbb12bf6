//! Percentage breakdowns of a filtered view.

use std::collections::HashMap;

use serde::Serialize;

use orb_data::models::CategoricalColumn;

use crate::{filter::View, palette::{self, Palette}};

/// One slice or bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Share {
    pub label: String,
    pub count: usize,
    /// `count / total * 100`, unrounded.
    pub percentage: f64,
}

impl Share {
    /// Bar text, e.g. `"33.3%"`.
    pub fn text(&self) -> String {
        format!("{:.1}%", self.percentage)
    }
}

/// Ordered shares over a common base of `total` rows.
///
/// An empty base yields no entries, never NaN percentages.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Distribution {
    pub entries: Vec<Share>,
    pub total: usize,
}

impl Distribution {
    /// Build from `(label, count)` pairs in display order.
    pub fn from_counts<L: Into<String>>(counts: impl IntoIterator<Item = (L, usize)>, total: usize) -> Self {
        if total == 0 {
            return Self::default();
        }
        let entries = counts
            .into_iter()
            .map(|(label, count)| Share {
                label: label.into(),
                count,
                percentage: count as f64 / total as f64 * 100.0,
            })
            .collect();
        Self { entries, total }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|s| s.label.as_str()).collect()
    }

    pub fn get(&self, label: &str) -> Option<&Share> {
        self.entries.iter().find(|s| s.label == label)
    }

    /// Drop zero-count entries.
    pub fn without_zeros(mut self) -> Self {
        self.entries.retain(|s| s.count > 0);
        self
    }
}

/// What a categorical chart does with empty cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullPolicy {
    /// Count them under this label.
    Label(&'static str),
    /// Leave them out of the base.
    Drop,
}

impl NullPolicy {
    pub const NONE: NullPolicy = NullPolicy::Label(palette::NONE);
}

/// Share of each label present in `view`, in palette order.
///
/// Labels the palette does not know (there should be none) follow the
/// palette's labels alphabetically.
pub fn categorical(
    view: &View<'_>,
    column: CategoricalColumn,
    palette: &Palette,
    nulls: NullPolicy,
) -> Distribution {
    let mut counts: HashMap<&'static str, usize> = HashMap::new();
    let mut total = 0;
    for row in view.rows() {
        let label = match (column.label(row), nulls) {
            (Some(label), _) => label,
            (None, NullPolicy::Label(label)) => label,
            (None, NullPolicy::Drop) => continue,
        };
        *counts.entry(label).or_default() += 1;
        total += 1;
    }

    let mut ordered: Vec<(&'static str, usize)> = counts.into_iter().collect();
    ordered.sort_by_key(|(label, _)| (palette.position(label).unwrap_or(usize::MAX), *label));
    Distribution::from_counts(ordered, total)
}
