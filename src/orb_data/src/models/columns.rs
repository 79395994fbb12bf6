//! Column catalogue for the per-day ORB statistics tables.
//!
//! [`Column`] names every column the dashboard knows about by its CSV header.
//! The narrower enums ([`DirectionColumn`], [`TimeColumn`], [`NumericColumn`])
//! exist so filters and charts can only be pointed at columns of the right
//! kind, and read them through typed accessors on [`OrbRow`].

use std::fmt;

use chrono::NaiveTime;
use serde::Serialize;

use crate::models::{labels::Direction, row::OrbRow};

/// Every expected column, named by its CSV header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Date,
    OrbConfDirection,
    OrbConfTime,
    OrbRangeDirection,
    OrbTrue,
    BoxColor,
    RangeConfDirection,
    RangeHighTime,
    RangeLowTime,
    OrbOpenTouchTime,
    MaxRetPct,
    MaxExtPct,
    MaxRetTime,
    MaxExtTime,
}

impl Column {
    /// All columns in table order.
    pub const ALL: [Column; 14] = [
        Column::Date,
        Column::OrbConfDirection,
        Column::OrbConfTime,
        Column::OrbRangeDirection,
        Column::OrbTrue,
        Column::BoxColor,
        Column::RangeConfDirection,
        Column::RangeHighTime,
        Column::RangeLowTime,
        Column::OrbOpenTouchTime,
        Column::MaxRetPct,
        Column::MaxExtPct,
        Column::MaxRetTime,
        Column::MaxExtTime,
    ];

    /// CSV header for this column.
    pub const fn name(self) -> &'static str {
        match self {
            Column::Date => "date",
            Column::OrbConfDirection => "orb_conf_direction",
            Column::OrbConfTime => "orb_conf_time",
            Column::OrbRangeDirection => "orb_range_direction",
            Column::OrbTrue => "orb_true",
            Column::BoxColor => "box_color",
            Column::RangeConfDirection => "range_conf_direction",
            Column::RangeHighTime => "range_high_time",
            Column::RangeLowTime => "range_low_time",
            Column::OrbOpenTouchTime => "orb_open_touch_time",
            Column::MaxRetPct => "max_ret_pct",
            Column::MaxExtPct => "max_ext_pct",
            Column::MaxRetTime => "max_ret_time",
            Column::MaxExtTime => "max_ext_time",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Columns holding a [`Direction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectionColumn {
    OrbConfDirection,
    OrbRangeDirection,
    RangeConfDirection,
}

impl DirectionColumn {
    pub const fn column(self) -> Column {
        match self {
            DirectionColumn::OrbConfDirection => Column::OrbConfDirection,
            DirectionColumn::OrbRangeDirection => Column::OrbRangeDirection,
            DirectionColumn::RangeConfDirection => Column::RangeConfDirection,
        }
    }

    pub fn get(self, row: &OrbRow) -> Option<Direction> {
        match self {
            DirectionColumn::OrbConfDirection => row.orb_conf_direction,
            DirectionColumn::OrbRangeDirection => row.orb_range_direction,
            DirectionColumn::RangeConfDirection => row.range_conf_direction,
        }
    }
}

/// Low-cardinality columns charted as pies, read as display labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoricalColumn {
    OrbTrue,
    BoxColor,
    Direction(DirectionColumn),
}

impl CategoricalColumn {
    pub const fn column(self) -> Column {
        match self {
            CategoricalColumn::OrbTrue => Column::OrbTrue,
            CategoricalColumn::BoxColor => Column::BoxColor,
            CategoricalColumn::Direction(c) => c.column(),
        }
    }

    /// The cell as its display label; booleans become `"True"`/`"False"`.
    pub fn label(self, row: &OrbRow) -> Option<&'static str> {
        match self {
            CategoricalColumn::OrbTrue => row.orb_true.map(|v| if v { "True" } else { "False" }),
            CategoricalColumn::BoxColor => row.box_color.map(|c| c.as_str()),
            CategoricalColumn::Direction(c) => c.get(row).map(|d| d.as_str()),
        }
    }
}

/// Columns holding a time of day; `None` means the event did not happen or
/// was not recorded, depending on the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeColumn {
    OrbConfTime,
    RangeHighTime,
    RangeLowTime,
    OrbOpenTouchTime,
    MaxRetTime,
    MaxExtTime,
}

impl TimeColumn {
    pub const fn column(self) -> Column {
        match self {
            TimeColumn::OrbConfTime => Column::OrbConfTime,
            TimeColumn::RangeHighTime => Column::RangeHighTime,
            TimeColumn::RangeLowTime => Column::RangeLowTime,
            TimeColumn::OrbOpenTouchTime => Column::OrbOpenTouchTime,
            TimeColumn::MaxRetTime => Column::MaxRetTime,
            TimeColumn::MaxExtTime => Column::MaxExtTime,
        }
    }

    pub fn get(self, row: &OrbRow) -> Option<NaiveTime> {
        match self {
            TimeColumn::OrbConfTime => row.orb_conf_time,
            TimeColumn::RangeHighTime => row.range_high_time,
            TimeColumn::RangeLowTime => row.range_low_time,
            TimeColumn::OrbOpenTouchTime => row.orb_open_touch_time,
            TimeColumn::MaxRetTime => row.max_ret_time,
            TimeColumn::MaxExtTime => row.max_ext_time,
        }
    }
}

/// Continuous percentage columns. Values may be infinite in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericColumn {
    MaxRetPct,
    MaxExtPct,
}

impl NumericColumn {
    pub const fn column(self) -> Column {
        match self {
            NumericColumn::MaxRetPct => Column::MaxRetPct,
            NumericColumn::MaxExtPct => Column::MaxExtPct,
        }
    }

    /// Raw value, possibly non-finite.
    pub fn get(self, row: &OrbRow) -> Option<f64> {
        match self {
            NumericColumn::MaxRetPct => row.max_ret_pct,
            NumericColumn::MaxExtPct => row.max_ext_pct,
        }
    }

    /// Value only when it is a finite number.
    pub fn finite(self, row: &OrbRow) -> Option<f64> {
        self.get(row).filter(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::labels::BoxColor;

    #[test]
    fn names_are_unique_snake_case() {
        let mut seen = std::collections::HashSet::new();
        for column in Column::ALL {
            let name = column.name();
            assert!(seen.insert(name), "duplicate header {name}");
            assert!(name.chars().all(|c| c.is_ascii_lowercase() || c == '_'));
        }
    }

    #[test]
    fn finite_skips_infinities() {
        let row = OrbRow {
            max_ret_pct: Some(f64::INFINITY),
            max_ext_pct: Some(1.25),
            ..OrbRow::default()
        };
        assert_eq!(NumericColumn::MaxRetPct.finite(&row), None);
        assert_eq!(NumericColumn::MaxExtPct.finite(&row), Some(1.25));
    }

    #[test]
    fn categorical_labels_match_display_text() {
        let row = OrbRow {
            orb_true: Some(false),
            box_color: Some(BoxColor::Neutral),
            ..OrbRow::default()
        };
        assert_eq!(CategoricalColumn::OrbTrue.label(&row), Some("False"));
        assert_eq!(CategoricalColumn::BoxColor.label(&row), Some("Neutral"));
        let dir = CategoricalColumn::Direction(DirectionColumn::RangeConfDirection);
        assert_eq!(dir.label(&row), None);
        assert_eq!(dir.column(), Column::RangeConfDirection);
    }
}
