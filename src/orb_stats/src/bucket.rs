//! bucket.rs: fixed-width value buckets for the retracement and extension
//! histograms.
//!
//! - Edges are integer multiples of the width: `k * width`.
//! - The range runs from `floor(min / width)` to `ceil(max / width)` multiples,
//!   one bucket at least.
//! - Interior values on an edge go to one side only, chosen by [`BucketClosure`];
//!   the outermost edges are always closed, so every value lands somewhere.
//! - Non-finite and missing values are ignored.

use serde::Serialize;

use orb_data::models::NumericColumn;

use crate::{
    distribution::Distribution,
    errors::StatsError,
    filter::View,
};

/// Upper bound on buckets per histogram.
pub const MAX_BUCKETS: u64 = 10_000;

/// Ratios within this distance of an integer are treated as on the edge,
/// so `0.3 / 0.1` counts as 3 and not 2.999….
const EDGE_EPSILON: f64 = 1e-9;

/// A validated bucket width: finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct BucketWidth(f64);

impl BucketWidth {
    pub fn new(width: f64) -> Result<Self, StatsError> {
        if width.is_finite() && width > 0.0 {
            Ok(Self(width))
        } else {
            Err(StatsError::InvalidBucketWidth(width))
        }
    }

    pub const fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for BucketWidth {
    type Error = StatsError;

    fn try_from(width: f64) -> Result<Self, Self::Error> {
        Self::new(width)
    }
}

/// Which side of an interior edge a value on that edge belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketClosure {
    /// `[lo, hi)`; the last bucket also takes its right edge.
    Left,
    /// `(lo, hi]`; the first bucket also takes its left edge.
    Right,
}

/// Whether zero-count buckets appear in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyBuckets {
    Hide,
    Show,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bucket {
    pub lo: f64,
    pub hi: f64,
    pub count: usize,
}

impl Bucket {
    /// `"[lo, hi)"` with one decimal, whatever the closure.
    pub fn label(&self) -> String {
        // `+ 0.0` turns a negative zero edge into "0.0"
        format!("[{:.1}, {:.1})", self.lo + 0.0, self.hi + 0.0)
    }
}

/// `value / width`, snapped to the nearest integer when within epsilon.
fn scaled(value: f64, width: f64) -> f64 {
    let ratio = value / width;
    let nearest = ratio.round();
    if (ratio - nearest).abs() < EDGE_EPSILON {
        nearest
    } else {
        ratio
    }
}

/// Bucket the finite values of `values`.
///
/// Returns no buckets when there are no finite values.
pub fn buckets(
    values: impl IntoIterator<Item = f64>,
    width: BucketWidth,
    closure: BucketClosure,
) -> Result<Vec<Bucket>, StatsError> {
    let w = width.get();
    let values: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
    let Some((min, max)) = values
        .iter()
        .fold(None, |acc: Option<(f64, f64)>, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    else {
        return Ok(Vec::new());
    };

    let first = scaled(min, w).floor();
    let last = scaled(max, w).ceil().max(first + 1.0);
    let span = last - first;
    if span > MAX_BUCKETS as f64 {
        return Err(StatsError::TooManyBuckets {
            buckets: span as u64,
            width: w,
            limit: MAX_BUCKETS,
        });
    }
    let n = span as usize;

    let mut out: Vec<Bucket> = (0..n)
        .map(|i| Bucket {
            lo: (first + i as f64) * w,
            hi: (first + i as f64 + 1.0) * w,
            count: 0,
        })
        .collect();

    for v in values {
        let s = scaled(v, w);
        let idx = match closure {
            BucketClosure::Left => s.floor() - first,
            BucketClosure::Right => s.ceil() - 1.0 - first,
        };
        let idx = idx.clamp(0.0, (n - 1) as f64) as usize;
        out[idx].count += 1;
    }
    Ok(out)
}

/// Percentage of `column`'s finite values falling in each bucket.
pub fn numeric(
    view: &View<'_>,
    column: NumericColumn,
    width: BucketWidth,
    closure: BucketClosure,
    empty: EmptyBuckets,
) -> Result<Distribution, StatsError> {
    let values = view.rows().iter().filter_map(|r| column.finite(r));
    let buckets = buckets(values, width, closure)?;
    let total = buckets.iter().map(|b| b.count).sum();
    let dist = Distribution::from_counts(buckets.iter().map(|b| (b.label(), b.count)), total);
    Ok(match empty {
        EmptyBuckets::Hide => dist.without_zeros(),
        EmptyBuckets::Show => dist,
    })
}
