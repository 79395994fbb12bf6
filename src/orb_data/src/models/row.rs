//! Canonical in-memory representation of one trading day's ORB statistics.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};

use crate::models::labels::{BoxColor, Direction};

/// One observation: a single trading day for one instrument / time-window
/// configuration.
///
/// Every field is optional. A column missing from the source table, an empty
/// cell and an unparseable cell all end up as `None`; what `None` *means*
/// (untouched, no confirmation, no data) is decided by the chart reading it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrbRow {
    /// Trading date.
    pub date: Option<NaiveDate>,

    /// Direction in which the opening range was confirmed.
    pub orb_conf_direction: Option<Direction>,
    /// Time of the opening range confirmation.
    pub orb_conf_time: Option<NaiveTime>,
    /// Direction of the opening range candle itself.
    pub orb_range_direction: Option<Direction>,
    /// Whether the confirmation held ("true" breakout).
    pub orb_true: Option<bool>,

    /// Colour of the range box.
    pub box_color: Option<BoxColor>,
    /// Direction in which the range was confirmed; `None` = never confirmed.
    pub range_conf_direction: Option<Direction>,

    /// Time the range high was printed.
    pub range_high_time: Option<NaiveTime>,
    /// Time the range low was printed.
    pub range_low_time: Option<NaiveTime>,
    /// First touch of the ORB open after confirmation; `None` = untouched.
    pub orb_open_touch_time: Option<NaiveTime>,

    /// Maximum retracement after confirmation, in percent of the range.
    pub max_ret_pct: Option<f64>,
    /// Maximum extension after confirmation, in percent of the range.
    pub max_ext_pct: Option<f64>,
    /// Time of the maximum retracement.
    pub max_ret_time: Option<NaiveTime>,
    /// Time of the maximum extension.
    pub max_ext_time: Option<NaiveTime>,
}

impl OrbRow {
    /// Day of week derived from [`OrbRow::date`].
    pub fn weekday(&self) -> Option<Weekday> {
        self.date.map(|d| d.weekday())
    }
}
