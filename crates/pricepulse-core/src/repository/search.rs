// Search repository: live API or the built-in demo fixture.

use pricepulse_api::{SearchClient, TransportConfig};
use tracing::debug;

use super::SearchRepository;
use super::demo::demo_results;
use crate::config::{ClientConfig, DataMode};
use crate::error::CoreError;
use crate::model::{ProductResult, SearchQuery, Store};

/// Search backend chosen once from [`DataMode`].
pub enum SearchProvider {
    Live {
        client: SearchClient,
        stores: Vec<Store>,
    },
    Demo,
}

impl SearchProvider {
    pub fn from_config(config: &ClientConfig) -> Result<Self, CoreError> {
        match &config.data_mode {
            DataMode::Demo => {
                debug!("no search API key configured, serving demo results");
                Ok(Self::Demo)
            }
            DataMode::Live { api_key } => {
                let transport = TransportConfig::with_timeout(config.timeout);
                let client =
                    SearchClient::from_api_key(config.base_url.as_str(), api_key, &transport)?;
                Ok(Self::Live {
                    client,
                    stores: config.stores.clone(),
                })
            }
        }
    }

    pub fn is_demo(&self) -> bool {
        matches!(self, Self::Demo)
    }
}

impl SearchRepository for SearchProvider {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<ProductResult>, CoreError> {
        match self {
            Self::Demo => Ok(demo_results()),
            Self::Live { client, stores } => {
                let stores: Vec<&str> = stores.iter().map(|store| store.as_ref()).collect();
                let response = client
                    .search(&query.query, &query.category, &stores)
                    .await?;
                debug!(
                    query = %query.query,
                    count = response.results.len(),
                    "search completed"
                );
                Ok(response.results.into_iter().map(ProductResult::from).collect())
            }
        }
    }
}
