//! A loaded table: typed rows plus what the loader learned about the source.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::models::{columns::Column, row::OrbRow};

/// Summary of what happened while turning a raw table into [`OrbRow`]s.
///
/// All counters are for one load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Number of data rows read from the source.
    pub rows_read: usize,
    /// Cells that held text the schema could not parse; they were blanked to `None`.
    pub cells_blanked: usize,
    /// Expected columns absent from the source header.
    pub missing_columns: Vec<Column>,
}

/// Typed rows for one (instrument, time-window) configuration.
#[derive(Debug, Clone)]
pub struct Dataset {
    rows: Vec<OrbRow>,
    columns: BTreeSet<Column>,
    report: LoadReport,
}

impl Dataset {
    /// The empty-table sentinel returned when acquisition fails.
    ///
    /// It has no rows but claims every column, so downstream code produces
    /// empty charts instead of a wall of missing-column warnings.
    pub fn empty() -> Self {
        Self::from_rows(Vec::new())
    }

    /// Rows built in memory with the full schema present.
    pub fn from_rows(rows: Vec<OrbRow>) -> Self {
        Self::new(rows, Column::ALL, 0)
    }

    /// Rows loaded from a source whose header contained `columns`.
    pub fn new(
        rows: Vec<OrbRow>,
        columns: impl IntoIterator<Item = Column>,
        cells_blanked: usize,
    ) -> Self {
        let columns: BTreeSet<Column> = columns.into_iter().collect();
        let report = LoadReport {
            rows_read: rows.len(),
            cells_blanked,
            missing_columns: Column::ALL
                .into_iter()
                .filter(|c| !columns.contains(c))
                .collect(),
        };
        Self {
            rows,
            columns,
            report,
        }
    }

    pub fn rows(&self) -> &[OrbRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True if the source header contained `column`.
    pub fn has_column(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    /// Expected columns the source did not provide, in table order.
    pub fn missing_columns(&self) -> &[Column] {
        &self.report.missing_columns
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    /// Earliest and latest trading date, if any row has one.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.rows.iter().filter_map(|r| r.date);
        let first = dates.next()?;
        Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::empty()
    }
}
