// Live catalog repository over `CatalogClient`.

use pricepulse_api::{CatalogClient, ProductCreateRequest, TransportConfig};
use tracing::debug;

use super::CatalogRepository;
use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::model::{NewProduct, PriceHistory, Product, ProductDetail, ProductId};

/// Catalog operations against the PricePulse backend.
pub struct LiveCatalog {
    client: CatalogClient,
}

impl LiveCatalog {
    pub fn new(config: &ClientConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig::with_timeout(config.timeout);
        let client = CatalogClient::new(config.base_url.as_str(), &transport)?;
        Ok(Self { client })
    }

    pub fn from_client(client: CatalogClient) -> Self {
        Self { client }
    }
}

impl CatalogRepository for LiveCatalog {
    async fn load_products(&self) -> Result<Vec<Product>, CoreError> {
        let products = self.client.list_products().await?;
        debug!(count = products.len(), "loaded products");
        Ok(products.into_iter().map(Product::from).collect())
    }

    async fn load_product(&self, id: &ProductId) -> Result<ProductDetail, CoreError> {
        let detail = self.client.get_product(id.as_str()).await?;
        Ok(detail.into())
    }

    async fn load_history(&self, id: &ProductId) -> Result<PriceHistory, CoreError> {
        let history = self.client.get_price_history(id.as_str()).await?;
        debug!(product_id = %id, count = history.history.len(), "loaded price history");
        Ok(history.into())
    }

    async fn add_product(&self, product: NewProduct) -> Result<ProductDetail, CoreError> {
        let request = ProductCreateRequest::from(product);
        let created = self.client.create_product(&request).await?;
        debug!(product_id = %created.product.id, "product created");
        Ok(created.into())
    }
}
