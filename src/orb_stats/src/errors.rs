use thiserror::Error;

/// Rejected parameters for the filter and distribution functions.
///
/// These are raised eagerly: a bad width never produces a half-built chart.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StatsError {
    /// Bucket widths must be finite and strictly positive.
    #[error("bucket width must be a positive number, got {0}")]
    InvalidBucketWidth(f64),

    /// The value range would need more buckets than a chart can show.
    #[error("{buckets} buckets of width {width} exceed the limit of {limit}")]
    TooManyBuckets {
        buckets: u64,
        width: f64,
        limit: u64,
    },

    /// A filter label that is neither the inactive sentinel nor a known value.
    #[error("unknown {kind} option '{label}'")]
    UnknownOption { kind: &'static str, label: String },
}
