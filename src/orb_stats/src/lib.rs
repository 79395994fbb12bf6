//! Filter engine and distribution builder for ORB statistics.
//!
//! Everything here is a pure function of a [`filter::View`] and its
//! parameters: the same inputs always give the same distributions.

pub mod bucket;
pub mod charts;
pub mod distribution;
pub mod errors;
pub mod filter;
pub mod options;
pub mod palette;
pub mod time_axis;

pub use bucket::{BucketClosure, BucketWidth, EmptyBuckets};
pub use charts::{Chart, ChartBody, ChartSet, build_charts};
pub use distribution::{Distribution, NullPolicy, Share};
pub use errors::StatsError;
pub use filter::{DateRange, FilterState, Predicate, Selection, View, apply};
pub use options::{FilterOptions, filter_options};
pub use time_axis::{Absence, TimeAxis, ZeroLabels};
