//! Parsers for individual CSV cells.
//!
//! Cells arrive as text (every column is read as a string column). Each
//! parser returns `None` for text it cannot interpret; [`Cells`] tells those
//! apart from genuinely empty cells and counts them.

use chrono::{NaiveDate, NaiveTime};

use crate::models::labels::{BoxColor, Direction};

/// Text the upstream exporters write for a missing value.
const NULL_TOKENS: [&str; 4] = ["none", "nan", "null", "nat"];

const TIME_FORMATS: [&str; 3] = ["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"];

/// Counts cells that held unparseable text while a table is being converted.
#[derive(Debug, Default)]
pub(crate) struct Cells {
    pub(crate) blanked: usize,
}

impl Cells {
    /// Parse one raw cell. Empty and null-token cells are `None` without
    /// complaint; anything else the parser rejects is blanked and counted.
    pub(crate) fn parse<T>(&mut self, raw: Option<&str>, parse: fn(&str) -> Option<T>) -> Option<T> {
        let text = raw.map(str::trim).filter(|t| !is_null(t))?;
        let value = parse(text);
        if value.is_none() {
            self.blanked += 1;
        }
        value
    }
}

fn is_null(text: &str) -> bool {
    text.is_empty() || NULL_TOKENS.iter().any(|t| t.eq_ignore_ascii_case(text))
}

/// `YYYY-MM-DD`, optionally followed by a time part (`2024-01-02 00:00:00`).
pub(crate) fn date(text: &str) -> Option<NaiveDate> {
    let head = text.get(..10).unwrap_or(text);
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// `HH:MM`, `HH:MM:SS`, `HH:MM:SS.fff`, or a datetime whose time part is used.
pub(crate) fn time(text: &str) -> Option<NaiveTime> {
    let tail = text
        .rsplit(|c: char| c == ' ' || c == 'T')
        .next()
        .unwrap_or(text);
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(tail, fmt).ok())
}

pub(crate) fn flag(text: &str) -> Option<bool> {
    match text {
        t if t.eq_ignore_ascii_case("true") || t == "1" || t == "1.0" => Some(true),
        t if t.eq_ignore_ascii_case("false") || t == "0" || t == "0.0" => Some(false),
        _ => None,
    }
}

/// Any float, including `inf`/`-inf`. NaN counts as missing.
pub(crate) fn number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| !v.is_nan())
}

pub(crate) fn direction(text: &str) -> Option<Direction> {
    text.parse().ok()
}

pub(crate) fn box_color(text: &str) -> Option<BoxColor> {
    text.parse().ok()
}

/// Normalise a wall-clock label to `HH:MM`, leaving unparseable text trimmed
/// but otherwise untouched.
pub fn normalize_hhmm(text: &str) -> String {
    let text = text.trim();
    match time(text) {
        Some(t) => t.format("%H:%M").to_string(),
        None => text.to_string(),
    }
}
