//! Where statistics tables come from.
//!
//! [`DatasetProvider`] is the seam: the HTTP provider reads the public
//! statistics repository, the directory provider reads the same files from
//! disk. Both return raw parse results; [`fetch_or_empty`] is the boundary
//! that never fails and always hands the caller a dataset.

pub mod dir;
pub mod errors;
pub mod http;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info, warn};

pub use dir::DirProvider;
pub use errors::ProviderError;
pub use http::HttpProvider;

use crate::{
    cache::FetchCache,
    models::Dataset,
    selector::{CombinationTable, DatasetKey, SelectorError},
};

/// Name of the combinations table next to the statistics files.
pub const COMBINATIONS_FILE: &str = "available_files.csv";

#[async_trait]
pub trait DatasetProvider: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    async fn fetch_combinations(&self) -> Result<CombinationTable, ProviderError>;

    async fn fetch_dataset(&self, filename: &str) -> Result<Dataset, ProviderError>;
}

/// What the caller asked for: a file directly, or a key to resolve first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    File(String),
    Key(DatasetKey),
}

/// How a [`fetch_or_empty`] call was served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FetchOutcome {
    Fresh { filename: String },
    Cached { filename: String },
    /// The key has no row in the combinations table.
    NotFound { key: DatasetKey },
    /// Fetching or parsing failed; the dataset is the empty sentinel.
    Failed { reason: String },
}

impl FetchOutcome {
    /// True when the dataset is real data rather than the empty sentinel.
    pub fn is_loaded(&self) -> bool {
        matches!(self, FetchOutcome::Fresh { .. } | FetchOutcome::Cached { .. })
    }
}

#[derive(Debug, Clone)]
pub struct Fetched {
    pub dataset: Arc<Dataset>,
    pub outcome: FetchOutcome,
}

impl Fetched {
    fn empty(outcome: FetchOutcome) -> Self {
        Self {
            dataset: Arc::new(Dataset::empty()),
            outcome,
        }
    }
}

/// The combinations table, read through `cache`. Errors are not cached.
pub async fn combinations(
    provider: &dyn DatasetProvider,
    cache: &FetchCache,
) -> Result<Arc<CombinationTable>, ProviderError> {
    if let Some(table) = cache.combinations() {
        debug!(provider = provider.name(), "combinations cache hit");
        return Ok(table);
    }
    let table = Arc::new(provider.fetch_combinations().await?);
    info!(
        provider = provider.name(),
        rows = table.rows().len(),
        "loaded combinations table"
    );
    cache.store_combinations(Arc::clone(&table));
    Ok(table)
}

/// Fetch a dataset through `cache`, absorbing every failure.
///
/// A key that does not resolve yields [`FetchOutcome::NotFound`]; any other
/// failure yields [`FetchOutcome::Failed`]. In both cases the dataset is
/// [`Dataset::empty`] and nothing is cached.
pub async fn fetch_or_empty(
    provider: &dyn DatasetProvider,
    cache: &FetchCache,
    source: &DatasetSource,
) -> Fetched {
    let filename = match source {
        DatasetSource::File(name) => name.clone(),
        DatasetSource::Key(key) => match resolve(provider, cache, key).await {
            Ok(name) => name,
            Err(outcome) => return Fetched::empty(outcome),
        },
    };

    if let Some(dataset) = cache.dataset(&filename) {
        debug!(provider = provider.name(), %filename, "dataset cache hit");
        return Fetched {
            dataset,
            outcome: FetchOutcome::Cached { filename },
        };
    }

    match provider.fetch_dataset(&filename).await {
        Ok(dataset) => {
            let report = dataset.report();
            info!(
                provider = provider.name(),
                %filename,
                rows = report.rows_read,
                blanked = report.cells_blanked,
                missing = report.missing_columns.len(),
                "loaded dataset"
            );
            let dataset = Arc::new(dataset);
            cache.store_dataset(&filename, Arc::clone(&dataset));
            Fetched {
                dataset,
                outcome: FetchOutcome::Fresh { filename },
            }
        }
        Err(e) => {
            warn!(provider = provider.name(), %filename, error = %e, "dataset fetch failed; using empty table");
            Fetched::empty(FetchOutcome::Failed {
                reason: format!("could not load {filename}: {e}"),
            })
        }
    }
}

async fn resolve(
    provider: &dyn DatasetProvider,
    cache: &FetchCache,
    key: &DatasetKey,
) -> Result<String, FetchOutcome> {
    let table = combinations(provider, cache).await.map_err(|e| {
        warn!(provider = provider.name(), error = %e, "combinations fetch failed");
        FetchOutcome::Failed {
            reason: format!("could not load {COMBINATIONS_FILE}: {e}"),
        }
    })?;
    match table.resolve(key) {
        Ok(name) => Ok(name.to_string()),
        Err(SelectorError::NotFound(key)) => {
            info!(%key, "no dataset for selection");
            Err(FetchOutcome::NotFound { key })
        }
        Err(e) => Err(FetchOutcome::Failed {
            reason: e.to_string(),
        }),
    }
}
