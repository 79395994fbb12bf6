//! Choices offered by the filter dropdowns, and parsing a chosen label back
//! into a [`Selection`].

use std::collections::BTreeSet;

use chrono::{NaiveTime, Weekday};
use serde::Serialize;

use orb_data::models::{BoxColor, Dataset, Direction};

use crate::{
    errors::StatsError,
    filter::Selection,
    palette::ALL,
    time_axis::hhmm,
};

/// Trading days offered by the day-of-week filter.
pub const WEEKDAYS: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

/// Full English day name, as shown in the dropdown.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Dropdown contents, each list starting with [`ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub weekday: Vec<String>,
    pub orb_conf_direction: Vec<String>,
    pub orb_conf_time: Vec<String>,
    pub orb_range_direction: Vec<String>,
    pub orb_true: Vec<String>,
    pub box_color: Vec<String>,
}

fn with_all<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    std::iter::once(ALL.to_string())
        .chain(values.into_iter().map(Into::into))
        .collect()
}

/// Options for `dataset`. Confirmation times come from the whole dataset,
/// not the filtered view, so picking one never hides the others.
pub fn filter_options(dataset: &Dataset) -> FilterOptions {
    let conf_times: BTreeSet<String> = dataset
        .rows()
        .iter()
        .filter_map(|r| r.orb_conf_time)
        .map(hhmm)
        .collect();

    FilterOptions {
        weekday: with_all(WEEKDAYS.map(weekday_name)),
        orb_conf_direction: with_all(Direction::ALL.map(Direction::as_str)),
        orb_conf_time: with_all(conf_times),
        orb_range_direction: with_all(Direction::ALL.map(Direction::as_str)),
        orb_true: with_all(["True", "False"]),
        box_color: with_all(BoxColor::ALL.map(BoxColor::as_str)),
    }
}

/// `"All"` (or a blank label) is inactive; anything else must parse.
pub fn selection_from_label<T>(
    kind: &'static str,
    label: &str,
    parse: impl FnOnce(&str) -> Option<T>,
) -> Result<Selection<T>, StatsError> {
    let label = label.trim();
    if label.is_empty() || label.eq_ignore_ascii_case(ALL) {
        return Ok(Selection::Inactive);
    }
    parse(label)
        .map(Selection::Value)
        .ok_or_else(|| StatsError::UnknownOption {
            kind,
            label: label.to_string(),
        })
}

pub fn parse_weekday(label: &str) -> Result<Selection<Weekday>, StatsError> {
    selection_from_label("day of week", label, |s| {
        WEEKDAYS
            .into_iter()
            .find(|d| weekday_name(*d).eq_ignore_ascii_case(s))
    })
}

pub fn parse_direction(label: &str) -> Result<Selection<Direction>, StatsError> {
    selection_from_label("direction", label, |s| s.parse().ok())
}

pub fn parse_box_color(label: &str) -> Result<Selection<BoxColor>, StatsError> {
    selection_from_label("box color", label, |s| s.parse().ok())
}

pub fn parse_flag(label: &str) -> Result<Selection<bool>, StatsError> {
    selection_from_label("true/false", label, |s| match s.to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    })
}

/// `HH:MM` or `HH:MM:SS`.
pub fn parse_time(label: &str) -> Result<Selection<NaiveTime>, StatsError> {
    selection_from_label("time", label, |s| {
        NaiveTime::parse_from_str(s, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
            .ok()
    })
}
