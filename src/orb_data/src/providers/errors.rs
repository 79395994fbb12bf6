use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur inside a `DatasetProvider` implementation.
///
/// None of these reach the dashboard directly: [`super::fetch_or_empty`]
/// turns them into an empty dataset plus a notice.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network failure, timeout, or a body that could not be read.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("GET {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The body was not a readable CSV table.
    #[error("malformed table: {0}")]
    Csv(#[from] polars::error::PolarsError),

    /// A table was readable but lacks a required column.
    #[error("unexpected table layout: {0}")]
    Schema(String),

    /// The request itself was rejected before any I/O (e.g. a path escaping
    /// the data directory).
    #[error("invalid request: {0}")]
    Validation(String),
}
