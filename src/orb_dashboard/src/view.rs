//! What the presentation layer receives: serializable projections of the
//! charts, never rendered output.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Serialize;

use orb_data::{models::Column, selector::DatasetKey};
use orb_stats::{Chart, ChartSet, DateRange, FilterOptions, Share};

/// A condition the user should see next to (or instead of) the charts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// The selection has no statistics file.
    NoData { key: DatasetKey },
    /// The file exists but could not be loaded.
    FetchFailed { reason: String },
    MissingColumn { column: Column },
    /// Cells that held unreadable values and were treated as empty.
    CellsBlanked { count: usize },
    /// A chart whose data could not be drawn.
    ChartSkipped { title: String, reason: String },
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::NoData { key } => format!("No data for this combination: {key}"),
            Notice::FetchFailed { reason } => format!("Data could not be loaded ({reason})"),
            Notice::MissingColumn { column } => {
                format!("Column '{column}' is not in this dataset; its chart is unavailable")
            }
            Notice::CellsBlanked { count } => {
                format!("{count} unreadable cell(s) were treated as empty")
            }
            Notice::ChartSkipped { title, reason } => format!("{title} not drawn: {reason}"),
        }
    }
}

/// Inclusive date span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl From<DateRange> for Span {
    fn from(range: DateRange) -> Self {
        Self {
            start: range.start(),
            end: range.end(),
        }
    }
}

impl From<(NaiveDate, NaiveDate)> for Span {
    fn from((start, end): (NaiveDate, NaiveDate)) -> Self {
        Self { start, end }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub label: String,
    pub percentage: f64,
    pub text: String,
}

impl From<&Share> for Entry {
    fn from(share: &Share) -> Self {
        Self {
            label: share.label.clone(),
            percentage: share.percentage,
            text: share.text(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    pub title: String,
    /// False when the chart's column is missing or it was skipped;
    /// `entries` is then empty.
    pub available: bool,
    pub entries: Vec<Entry>,
    /// Label → colour; empty for bar charts.
    pub colors: IndexMap<String, String>,
}

impl From<&Chart> for ChartView {
    fn from(chart: &Chart) -> Self {
        let entries = chart
            .distribution()
            .map(|d| d.entries.iter().map(Entry::from).collect())
            .unwrap_or_default();
        Self {
            title: chart.title.to_string(),
            available: chart.distribution().is_some(),
            entries,
            colors: chart.palette.map(|p| p.to_map()).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartsView {
    pub pies: Vec<ChartView>,
    pub range_times: Vec<ChartView>,
    pub histograms: Vec<ChartView>,
    pub extreme_times: Vec<ChartView>,
}

impl From<&ChartSet> for ChartsView {
    fn from(set: &ChartSet) -> Self {
        let project = |charts: &[Chart]| -> Vec<ChartView> { charts.iter().map(ChartView::from).collect() };
        Self {
            pies: project(&set.pies),
            range_times: project(&set.range_times),
            histograms: project(&set.histograms),
            extreme_times: project(&set.extreme_times),
        }
    }
}

/// One render of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub selection: DatasetKey,
    pub bucket_width: f64,
    pub notices: Vec<Notice>,
    /// Rows in the filtered view.
    pub sample_size: usize,
    /// Rows of the filtered view with a defined max retracement: the base of
    /// the retracement histogram.
    pub retracement_base: usize,
    /// First and last date of the loaded dataset.
    pub date_bounds: Option<Span>,
    /// The date filter applied.
    pub date_range: Option<Span>,
    pub filter_options: Option<FilterOptions>,
    /// `None` when there is no dataset for the selection.
    pub charts: Option<ChartsView>,
}

impl DashboardView {
    pub fn messages(&self) -> Vec<String> {
        self.notices.iter().map(Notice::message).collect()
    }
}

/// Choices for the dataset selector, each list narrowed by the pick before it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectorOptions {
    pub instruments: Vec<String>,
    pub orb_starts: Vec<String>,
    pub orb_ends: Vec<String>,
    pub range_ends: Vec<String>,
    pub bucket_widths: Vec<f64>,
    pub default_bucket_width: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notices: Vec<Notice>,
}
