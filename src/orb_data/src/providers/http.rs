use async_trait::async_trait;
use reqwest::Client;
use shared_utils::env::env_or;

use crate::{
    io::{combinations_from_csv, dataset_from_csv},
    models::Dataset,
    providers::{COMBINATIONS_FILE, DatasetProvider, ProviderError},
    selector::CombinationTable,
};

/// Raw-file root of the public ORB statistics repository.
pub const DEFAULT_BASE_URL: &str = "https://raw.githubusercontent.com/TuckerArrants/rdr_orb/main";

/// Overrides [`DEFAULT_BASE_URL`] when set.
pub const BASE_URL_ENV: &str = "ORB_DATA_BASE_URL";

/// Fetches statistics files over HTTP: `GET {base_url}/{file}`.
pub struct HttpProvider {
    client: Client,
    base_url: String,
}

impl HttpProvider {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Base URL from `ORB_DATA_BASE_URL`, falling back to the public repository.
    pub fn from_env() -> Result<Self, ProviderError> {
        Self::new(env_or(BASE_URL_ENV, DEFAULT_BASE_URL))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, file: &str) -> String {
        format!("{}/{}", self.base_url, file.trim_start_matches('/'))
    }

    async fn get(&self, file: &str) -> Result<Vec<u8>, ProviderError> {
        let url = self.url_for(file);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                url,
                status: status.as_u16(),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl DatasetProvider for HttpProvider {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_combinations(&self) -> Result<CombinationTable, ProviderError> {
        combinations_from_csv(self.get(COMBINATIONS_FILE).await?)
    }

    async fn fetch_dataset(&self, filename: &str) -> Result<Dataset, ProviderError> {
        dataset_from_csv(self.get(filename).await?)
    }
}
