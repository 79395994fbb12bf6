//! Time-of-day histograms that share one x-axis across a group of columns.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveTime;
use serde::Serialize;

use orb_data::models::TimeColumn;

use crate::{distribution::Distribution, filter::View};

/// `HH:MM` label for a time of day.
pub fn hhmm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Ordered `HH:MM` labels, optionally ending in a sentinel for "no event".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeAxis {
    labels: Vec<String>,
    sentinel: Option<String>,
}

impl TimeAxis {
    /// Union of every time in `columns` over `view`, in chronological order,
    /// then `sentinel` if given. Times that format to the same label appear
    /// once.
    pub fn for_group(view: &View<'_>, columns: &[TimeColumn], sentinel: Option<&str>) -> Self {
        let times: BTreeSet<NaiveTime> = view
            .rows()
            .iter()
            .flat_map(|row| columns.iter().filter_map(move |c| c.get(row)))
            .collect();

        let mut labels: Vec<String> = Vec::with_capacity(times.len() + 1);
        for t in times {
            let label = hhmm(t);
            if labels.last() != Some(&label) {
                labels.push(label);
            }
        }
        let sentinel = sentinel.map(str::to_string);
        if let Some(s) = &sentinel {
            labels.push(s.clone());
        }
        Self { labels, sentinel }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn sentinel(&self) -> Option<&str> {
        self.sentinel.as_deref()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// What an empty time cell means for one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Absence {
    /// The event never happened: count the row under the axis sentinel.
    Untouched,
    /// No data: leave the row out of the base.
    Drop,
}

/// Whether axis labels with no rows appear in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZeroLabels {
    Hide,
    Show,
}

/// Share of rows per axis label for one column of the group.
///
/// With [`Absence::Untouched`] the axis must carry a sentinel; without one
/// empty cells are dropped.
pub fn distribution(
    view: &View<'_>,
    column: TimeColumn,
    axis: &TimeAxis,
    absence: Absence,
    zeros: ZeroLabels,
) -> Distribution {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut total = 0;
    for row in view.rows() {
        let label = match (column.get(row), absence, axis.sentinel()) {
            (Some(t), _, _) => hhmm(t),
            (None, Absence::Untouched, Some(sentinel)) => sentinel.to_string(),
            (None, _, _) => continue,
        };
        *counts.entry(label).or_default() += 1;
        total += 1;
    }

    let dist = Distribution::from_counts(
        axis.labels()
            .iter()
            .map(|label| (label.clone(), counts.get(label).copied().unwrap_or(0))),
        total,
    );
    match zeros {
        ZeroLabels::Hide => dist.without_zeros(),
        ZeroLabels::Show => dist,
    }
}
