use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use crate::{
    io::{combinations_from_csv, dataset_from_csv},
    models::Dataset,
    providers::{COMBINATIONS_FILE, DatasetProvider, ProviderError},
    selector::CombinationTable,
};

/// Reads statistics files from a local directory laid out like the remote
/// repository (`available_files.csv` plus one CSV per configuration).
pub struct DirProvider {
    root: PathBuf,
}

impl DirProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Only plain relative names are accepted; `..` and absolute paths would
    /// read outside the data directory.
    fn path_for(&self, file: &str) -> Result<PathBuf, ProviderError> {
        let rel = Path::new(file);
        if file.is_empty() || !rel.components().all(|c| matches!(c, Component::Normal(_))) {
            return Err(ProviderError::Validation(format!(
                "'{file}' is not a plain file name"
            )));
        }
        Ok(self.root.join(rel))
    }

    async fn read(&self, file: &str) -> Result<Vec<u8>, ProviderError> {
        let path = self.path_for(file)?;
        tokio::fs::read(&path)
            .await
            .map_err(|source| ProviderError::Io { path, source })
    }
}

#[async_trait]
impl DatasetProvider for DirProvider {
    fn name(&self) -> &str {
        "dir"
    }

    async fn fetch_combinations(&self) -> Result<CombinationTable, ProviderError> {
        combinations_from_csv(self.read(COMBINATIONS_FILE).await?)
    }

    async fn fetch_dataset(&self, filename: &str) -> Result<Dataset, ProviderError> {
        dataset_from_csv(self.read(filename).await?)
    }
}
