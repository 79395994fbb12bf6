//! The dashboard's fixed set of charts, described as data and built from a
//! filtered view in one pass.

use serde::Serialize;
use tracing::warn;

use orb_data::models::{CategoricalColumn, Column, DirectionColumn, NumericColumn, TimeColumn};

use crate::{
    bucket::{self, BucketClosure, BucketWidth, EmptyBuckets},
    distribution::{self, Distribution, NullPolicy},
    filter::View,
    palette::{self, Palette},
    time_axis::{self, Absence, TimeAxis, ZeroLabels},
};

pub struct PieSpec {
    pub title: &'static str,
    pub column: CategoricalColumn,
    pub palette: Palette,
    pub nulls: NullPolicy,
}

pub const PIES: [PieSpec; 3] = [
    PieSpec {
        title: "ORB True Rate",
        column: CategoricalColumn::OrbTrue,
        palette: palette::TRUE_RATE,
        nulls: NullPolicy::Drop,
    },
    PieSpec {
        title: "RDR Box Color",
        column: CategoricalColumn::BoxColor,
        palette: palette::BOX_COLOR,
        nulls: NullPolicy::Drop,
    },
    PieSpec {
        title: "RDR Confirmation Direction",
        column: CategoricalColumn::Direction(DirectionColumn::RangeConfDirection),
        palette: palette::DIRECTION,
        nulls: NullPolicy::NONE,
    },
];

/// Time charts sharing one axis.
pub struct TimeGroupSpec {
    pub charts: &'static [(&'static str, TimeColumn)],
    /// Appended to the axis; required for [`Absence::Untouched`].
    pub sentinel: Option<&'static str>,
    pub absence: Absence,
    pub zeros: ZeroLabels,
}

impl TimeGroupSpec {
    pub fn columns(&self) -> Vec<TimeColumn> {
        self.charts.iter().map(|(_, c)| *c).collect()
    }
}

/// Range high/low and ORB open touch: an empty cell means untouched.
pub const RANGE_TIMES: TimeGroupSpec = TimeGroupSpec {
    charts: &[
        ("Range High Time", TimeColumn::RangeHighTime),
        ("Range Low Time", TimeColumn::RangeLowTime),
        ("ORB Open Touch Time After Conf.", TimeColumn::OrbOpenTouchTime),
    ],
    sentinel: Some(palette::UNTOUCHED),
    absence: Absence::Untouched,
    zeros: ZeroLabels::Hide,
};

/// Times of the retracement / extension extremes: an empty cell is no data.
pub const EXTREME_TIMES: TimeGroupSpec = TimeGroupSpec {
    charts: &[
        ("ORB Max Retracement Time", TimeColumn::MaxRetTime),
        ("ORB Max Extension Time", TimeColumn::MaxExtTime),
    ],
    sentinel: None,
    absence: Absence::Drop,
    zeros: ZeroLabels::Hide,
};

pub struct HistogramSpec {
    pub title: &'static str,
    pub column: NumericColumn,
    pub closure: BucketClosure,
    pub empty: EmptyBuckets,
}

pub const HISTOGRAMS: [HistogramSpec; 2] = [
    HistogramSpec {
        title: "ORB Max Retracements",
        column: NumericColumn::MaxRetPct,
        closure: BucketClosure::Left,
        empty: EmptyBuckets::Hide,
    },
    HistogramSpec {
        title: "ORB Max Extensions",
        column: NumericColumn::MaxExtPct,
        closure: BucketClosure::Right,
        empty: EmptyBuckets::Show,
    },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartBody {
    Ready { distribution: Distribution },
    /// The source column is not in the dataset.
    Unavailable { column: Column },
    /// The data cannot be drawn with the chosen parameters.
    Skipped { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub title: &'static str,
    pub column: Column,
    /// Label → colour, for pies; empty for bar charts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub palette: Option<Palette>,
    pub body: ChartBody,
}

impl Chart {
    pub fn distribution(&self) -> Option<&Distribution> {
        match &self.body {
            ChartBody::Ready { distribution } => Some(distribution),
            ChartBody::Unavailable { .. } | ChartBody::Skipped { .. } => None,
        }
    }

    /// Why a chart present in the dataset was not drawn.
    pub fn skipped(&self) -> Option<&str> {
        match &self.body {
            ChartBody::Skipped { reason } => Some(reason),
            ChartBody::Ready { .. } | ChartBody::Unavailable { .. } => None,
        }
    }
}

/// Every chart of the dashboard, grouped as they are laid out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSet {
    pub pies: Vec<Chart>,
    pub range_times: Vec<Chart>,
    pub histograms: Vec<Chart>,
    pub extreme_times: Vec<Chart>,
}

impl ChartSet {
    pub fn iter(&self) -> impl Iterator<Item = &Chart> {
        self.pies
            .iter()
            .chain(&self.range_times)
            .chain(&self.histograms)
            .chain(&self.extreme_times)
    }

    /// Columns behind the charts marked unavailable, without repeats.
    pub fn unavailable_columns(&self) -> Vec<Column> {
        let mut out: Vec<Column> = self
            .iter()
            .filter_map(|c| match c.body {
                ChartBody::Unavailable { column } => Some(column),
                ChartBody::Ready { .. } | ChartBody::Skipped { .. } => None,
            })
            .collect();
        out.sort();
        out.dedup();
        out
    }
}

fn chart(
    title: &'static str,
    column: Column,
    palette: Option<Palette>,
    view: &View<'_>,
    build: impl FnOnce() -> Distribution,
) -> Chart {
    let body = if view.has_column(column) {
        ChartBody::Ready {
            distribution: build(),
        }
    } else {
        warn!(%column, chart = title, "chart unavailable: column missing from dataset");
        ChartBody::Unavailable { column }
    };
    Chart {
        title,
        column,
        palette,
        body,
    }
}

fn time_group(view: &View<'_>, spec: &TimeGroupSpec) -> Vec<Chart> {
    let present: Vec<TimeColumn> = spec
        .columns()
        .into_iter()
        .filter(|c| view.has_column(c.column()))
        .collect();
    let axis = TimeAxis::for_group(view, &present, spec.sentinel);

    spec.charts
        .iter()
        .map(|&(title, column)| {
            chart(title, column.column(), None, view, || {
                time_axis::distribution(view, column, &axis, spec.absence, spec.zeros)
            })
        })
        .collect()
}

/// Build every chart from `view`.
///
/// A missing column makes just its chart unavailable. A histogram whose
/// values span too many buckets is skipped; the other charts still build.
pub fn build_charts(view: &View<'_>, width: BucketWidth) -> ChartSet {
    let pies = PIES
        .iter()
        .map(|spec| {
            chart(spec.title, spec.column.column(), Some(spec.palette), view, || {
                distribution::categorical(view, spec.column, &spec.palette, spec.nulls)
            })
        })
        .collect();

    let mut histograms = Vec::with_capacity(HISTOGRAMS.len());
    for spec in &HISTOGRAMS {
        let column = spec.column.column();
        let body = if !view.has_column(column) {
            warn!(%column, chart = spec.title, "chart unavailable: column missing from dataset");
            ChartBody::Unavailable { column }
        } else {
            match bucket::numeric(view, spec.column, width, spec.closure, spec.empty) {
                Ok(distribution) => ChartBody::Ready { distribution },
                Err(e) => {
                    warn!(%column, chart = spec.title, error = %e, "histogram skipped");
                    ChartBody::Skipped {
                        reason: e.to_string(),
                    }
                }
            }
        };
        histograms.push(Chart {
            title: spec.title,
            column,
            palette: None,
            body,
        });
    }

    ChartSet {
        pies,
        range_times: time_group(view, &RANGE_TIMES),
        histograms,
        extreme_times: time_group(view, &EXTREME_TIMES),
    }
}
