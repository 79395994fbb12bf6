//! Dataset selection: which statistics file belongs to an
//! (instrument, ORB window, range end) configuration.
//!
//! The lookup table is `available_files.csv`. Its rows also drive the
//! dependent dropdowns of the sidebar: picking an instrument narrows the ORB
//! start times, which narrow the end times, and so on.

use std::{collections::BTreeSet, fmt};

use chrono::NaiveTime;
use serde::Serialize;
use thiserror::Error;

use crate::io::cells::normalize_hhmm;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectorError {
    /// No row of the combinations table matches the key.
    #[error("no data for {0}")]
    NotFound(DatasetKey),

    /// The key itself is malformed (bad time text or an impossible window).
    #[error("invalid selection: {0}")]
    InvalidParameter(String),
}

/// Identifies one statistics table. Times are `HH:MM` strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DatasetKey {
    pub instrument: String,
    pub orb_start: String,
    pub orb_end: String,
    pub range_end: String,
}

impl DatasetKey {
    /// Build a key, trimming the instrument and normalising times to `HH:MM`.
    pub fn new(
        instrument: impl AsRef<str>,
        orb_start: impl AsRef<str>,
        orb_end: impl AsRef<str>,
        range_end: impl AsRef<str>,
    ) -> Self {
        Self {
            instrument: instrument.as_ref().trim().to_string(),
            orb_start: normalize_hhmm(orb_start.as_ref()),
            orb_end: normalize_hhmm(orb_end.as_ref()),
            range_end: normalize_hhmm(range_end.as_ref()),
        }
    }

    /// Reject keys that cannot describe a real window: every time must be
    /// `HH:MM` and `orb_start < orb_end <= range_end`.
    pub fn validate(&self) -> Result<(), SelectorError> {
        if self.instrument.is_empty() {
            return Err(SelectorError::InvalidParameter("instrument is empty".into()));
        }
        let start = parse_hhmm("orb_start", &self.orb_start)?;
        let end = parse_hhmm("orb_end", &self.orb_end)?;
        let range_end = parse_hhmm("range_end", &self.range_end)?;

        if start >= end {
            return Err(SelectorError::InvalidParameter(format!(
                "ORB start {} must be before ORB end {}",
                self.orb_start, self.orb_end
            )));
        }
        if end > range_end {
            return Err(SelectorError::InvalidParameter(format!(
                "ORB end {} must not be after range end {}",
                self.orb_end, self.range_end
            )));
        }
        Ok(())
    }
}

fn parse_hhmm(field: &str, text: &str) -> Result<NaiveTime, SelectorError> {
    NaiveTime::parse_from_str(text, "%H:%M")
        .map_err(|_| SelectorError::InvalidParameter(format!("{field} '{text}' is not HH:MM")))
}

impl fmt::Display for DatasetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ORB {}-{} range end {}",
            self.instrument, self.orb_start, self.orb_end, self.range_end
        )
    }
}

/// One row of the combinations table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combination {
    pub key: DatasetKey,
    pub filename: String,
}

/// The parsed combinations table.
#[derive(Debug, Clone, Default)]
pub struct CombinationTable {
    rows: Vec<Combination>,
}

impl CombinationTable {
    pub fn new(rows: Vec<Combination>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Combination] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn instruments(&self) -> Vec<String> {
        distinct(self.rows.iter().map(|c| &c.key.instrument))
    }

    pub fn orb_starts(&self, instrument: &str) -> Vec<String> {
        distinct(
            self.rows
                .iter()
                .filter(|c| c.key.instrument == instrument)
                .map(|c| &c.key.orb_start),
        )
    }

    pub fn orb_ends(&self, instrument: &str, orb_start: &str) -> Vec<String> {
        distinct(
            self.rows
                .iter()
                .filter(|c| c.key.instrument == instrument && c.key.orb_start == orb_start)
                .map(|c| &c.key.orb_end),
        )
    }

    pub fn range_ends(&self, instrument: &str, orb_start: &str, orb_end: &str) -> Vec<String> {
        distinct(
            self.rows
                .iter()
                .filter(|c| {
                    c.key.instrument == instrument
                        && c.key.orb_start == orb_start
                        && c.key.orb_end == orb_end
                })
                .map(|c| &c.key.range_end),
        )
    }

    /// Filename of the first row matching `key`.
    pub fn resolve(&self, key: &DatasetKey) -> Result<&str, SelectorError> {
        self.rows
            .iter()
            .find(|c| &c.key == key)
            .map(|c| c.filename.as_str())
            .ok_or_else(|| SelectorError::NotFound(key.clone()))
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a String>) -> Vec<String> {
    values
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
