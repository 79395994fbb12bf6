//! Process-wide, read-mostly cache of fetched tables.
//!
//! Readers load an `Arc` snapshot with no locking. Writers publish a new
//! snapshot with `rcu`, so a reader sees either the old or the new map.
//!
//! The session gate calls [`FetchCache::clear`] once per successful login,
//! so a fresh session never replays tables fetched before it.
//! Only successful fetches are stored.

use std::{collections::HashMap, sync::Arc};

use arc_swap::{ArcSwap, ArcSwapOption};
use once_cell::sync::Lazy;
use tracing::debug;

use crate::{models::Dataset, selector::CombinationTable};

type DatasetMap = HashMap<String, Arc<Dataset>>;

static GLOBAL: Lazy<FetchCache> = Lazy::new(FetchCache::new);

/// The cache shared by every session in this process.
pub fn global() -> &'static FetchCache {
    &GLOBAL
}

pub struct FetchCache {
    combinations: ArcSwapOption<CombinationTable>,
    datasets: ArcSwap<DatasetMap>,
}

impl FetchCache {
    pub fn new() -> Self {
        Self {
            combinations: ArcSwapOption::empty(),
            datasets: ArcSwap::from_pointee(DatasetMap::new()),
        }
    }

    pub fn combinations(&self) -> Option<Arc<CombinationTable>> {
        self.combinations.load_full()
    }

    pub fn store_combinations(&self, table: Arc<CombinationTable>) {
        self.combinations.store(Some(table));
    }

    /// Cached dataset for `filename`, if it was fetched successfully before.
    pub fn dataset(&self, filename: &str) -> Option<Arc<Dataset>> {
        self.datasets.load().get(filename).cloned()
    }

    pub fn store_dataset(&self, filename: &str, dataset: Arc<Dataset>) {
        self.datasets.rcu(|current| {
            let mut next = DatasetMap::clone(current);
            next.insert(filename.to_string(), Arc::clone(&dataset));
            next
        });
    }

    /// Number of cached datasets (the combinations table is not counted).
    pub fn len(&self) -> usize {
        self.datasets.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0 && self.combinations.load().is_none()
    }

    /// Drop every cached table.
    pub fn clear(&self) {
        let dropped = self.len();
        self.combinations.store(None);
        self.datasets.store(Arc::new(DatasetMap::new()));
        debug!(dropped, "cleared fetch cache");
    }
}

impl Default for FetchCache {
    fn default() -> Self {
        Self::new()
    }
}
