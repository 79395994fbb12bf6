//! Filter engine: conjunctive predicates over a borrowed view of a dataset.
//!
//! Each [`Predicate`] is an independent conjunct, so filtering in steps gives
//! the same rows as filtering once with all predicates. Inactive predicates
//! are skipped outright.

use chrono::{NaiveDate, NaiveTime, Timelike, Weekday};
use tracing::warn;

use orb_data::models::{BoxColor, Column, Dataset, Direction, DirectionColumn, OrbRow, TimeColumn};

/// A filter parameter: off, one value, or a set of allowed values.
///
/// An empty `AnyOf` is the same as `Inactive`: selecting nothing in a
/// multi-select keeps every row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    Inactive,
    Value(T),
    AnyOf(Vec<T>),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::Inactive
    }
}

impl<T: PartialEq> Selection<T> {
    pub fn is_active(&self) -> bool {
        match self {
            Selection::Inactive => false,
            Selection::Value(_) => true,
            Selection::AnyOf(values) => !values.is_empty(),
        }
    }

    /// Whether a cell passes. Missing cells never pass an active selection.
    pub fn matches(&self, value: Option<&T>) -> bool {
        match self {
            Selection::Inactive => true,
            Selection::AnyOf(values) if values.is_empty() => true,
            Selection::Value(want) => value == Some(want),
            Selection::AnyOf(values) => value.is_some_and(|v| values.contains(v)),
        }
    }
}

impl<T> Selection<T> {
    /// The same selection over transformed values.
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> Selection<U> {
        match self {
            Selection::Inactive => Selection::Inactive,
            Selection::Value(v) => Selection::Value(f(v)),
            Selection::AnyOf(values) => Selection::AnyOf(values.iter().map(f).collect()),
        }
    }
}

/// `time` with seconds dropped, the resolution of every time label.
pub fn to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}

impl<T> From<Option<T>> for Selection<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Selection::Inactive, Selection::Value)
    }
}

/// Inclusive calendar range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Range between two picks, in either order.
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// The degenerate range `[day, day]`, for a picker that returned one date.
    pub fn single(day: NaiveDate) -> Self {
        Self::new(day, day)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}

impl From<(NaiveDate, NaiveDate)> for DateRange {
    fn from((a, b): (NaiveDate, NaiveDate)) -> Self {
        Self::new(a, b)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Direction {
        column: DirectionColumn,
        selection: Selection<Direction>,
    },
    BoxColor(Selection<BoxColor>),
    OrbTrue(Selection<bool>),
    Time {
        column: TimeColumn,
        selection: Selection<NaiveTime>,
    },
    Weekday(Selection<Weekday>),
    DateRange(DateRange),
}

impl Predicate {
    /// Column the predicate reads; day-of-week is derived from `date`.
    pub fn column(&self) -> Column {
        match self {
            Predicate::Direction { column, .. } => column.column(),
            Predicate::BoxColor(_) => Column::BoxColor,
            Predicate::OrbTrue(_) => Column::OrbTrue,
            Predicate::Time { column, .. } => column.column(),
            Predicate::Weekday(_) | Predicate::DateRange(_) => Column::Date,
        }
    }

    pub fn is_active(&self) -> bool {
        match self {
            Predicate::Direction { selection, .. } => selection.is_active(),
            Predicate::BoxColor(s) => s.is_active(),
            Predicate::OrbTrue(s) => s.is_active(),
            Predicate::Time { selection, .. } => selection.is_active(),
            Predicate::Weekday(s) => s.is_active(),
            Predicate::DateRange(_) => true,
        }
    }

    pub fn matches(&self, row: &OrbRow) -> bool {
        match self {
            Predicate::Direction { column, selection } => selection.matches(column.get(row).as_ref()),
            Predicate::BoxColor(s) => s.matches(row.box_color.as_ref()),
            Predicate::OrbTrue(s) => s.matches(row.orb_true.as_ref()),
            Predicate::Time { column, selection } => selection
                .map(|t| to_minute(*t))
                .matches(column.get(row).map(to_minute).as_ref()),
            Predicate::Weekday(s) => s.matches(row.weekday().as_ref()),
            Predicate::DateRange(range) => row.date.is_some_and(|d| range.contains(d)),
        }
    }
}

/// The dashboard's filter selections. `Default` has every filter off.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub weekday: Selection<Weekday>,
    pub date_range: Option<DateRange>,
    pub orb_conf_direction: Selection<Direction>,
    pub orb_conf_time: Selection<NaiveTime>,
    pub orb_range_direction: Selection<Direction>,
    pub orb_true: Selection<bool>,
    pub box_color: Selection<BoxColor>,
}

impl FilterState {
    /// The state after "Reset all filters": everything off except the date
    /// range, which spans the whole dataset.
    pub fn reset(date_bounds: Option<(NaiveDate, NaiveDate)>) -> Self {
        Self {
            date_range: date_bounds.map(DateRange::from),
            ..Self::default()
        }
    }

    pub fn with_weekday(mut self, selection: Selection<Weekday>) -> Self {
        self.weekday = selection;
        self
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    pub fn with_orb_conf_direction(mut self, selection: Selection<Direction>) -> Self {
        self.orb_conf_direction = selection;
        self
    }

    pub fn with_orb_conf_time(mut self, selection: Selection<NaiveTime>) -> Self {
        self.orb_conf_time = selection;
        self
    }

    pub fn with_orb_range_direction(mut self, selection: Selection<Direction>) -> Self {
        self.orb_range_direction = selection;
        self
    }

    pub fn with_orb_true(mut self, selection: Selection<bool>) -> Self {
        self.orb_true = selection;
        self
    }

    pub fn with_box_color(mut self, selection: Selection<BoxColor>) -> Self {
        self.box_color = selection;
        self
    }

    /// The active filters as predicates.
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut out = vec![
            Predicate::Weekday(self.weekday.clone()),
            Predicate::Direction {
                column: DirectionColumn::OrbConfDirection,
                selection: self.orb_conf_direction.clone(),
            },
            Predicate::Time {
                column: TimeColumn::OrbConfTime,
                selection: self.orb_conf_time.clone(),
            },
            Predicate::Direction {
                column: DirectionColumn::OrbRangeDirection,
                selection: self.orb_range_direction.clone(),
            },
            Predicate::OrbTrue(self.orb_true.clone()),
            Predicate::BoxColor(self.box_color.clone()),
        ];
        if let Some(range) = self.date_range {
            out.push(Predicate::DateRange(range));
        }
        out.retain(Predicate::is_active);
        out
    }
}

/// Rows of a dataset that passed a set of predicates.
#[derive(Debug, Clone)]
pub struct View<'a> {
    dataset: &'a Dataset,
    rows: Vec<&'a OrbRow>,
}

impl<'a> View<'a> {
    /// Every row of `dataset`.
    pub fn of(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            rows: dataset.rows().iter().collect(),
        }
    }

    /// Rows of this view passing every predicate.
    ///
    /// A predicate on a column the dataset does not have is skipped with a
    /// warning rather than emptying the view.
    pub fn filter(&self, predicates: &[Predicate]) -> View<'a> {
        let usable: Vec<&Predicate> = predicates
            .iter()
            .filter(|p| p.is_active())
            .filter(|p| {
                let present = self.dataset.has_column(p.column());
                if !present {
                    warn!(column = %p.column(), "filter skipped: column missing from dataset");
                }
                present
            })
            .collect();

        let rows = self
            .rows
            .iter()
            .copied()
            .filter(|row| usable.iter().all(|p| p.matches(row)))
            .collect();
        View {
            dataset: self.dataset,
            rows,
        }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn rows(&self) -> &[&'a OrbRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: Column) -> bool {
        self.dataset.has_column(column)
    }
}

/// Filter `dataset` by `state`.
pub fn apply<'a>(dataset: &'a Dataset, state: &FilterState) -> View<'a> {
    View::of(dataset).filter(&state.predicates())
}
