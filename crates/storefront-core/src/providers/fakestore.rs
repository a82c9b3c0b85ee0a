use std::time::Duration;

use storefront_api::FakeStoreClient;

use super::CatalogProvider;
use crate::{
    config::ApiConfig,
    models::{Product, ProductId},
    Result,
};

/// Fake Store API provider
pub struct FakeStoreProvider {
    client: FakeStoreClient,
}

impl FakeStoreProvider {
    pub fn new(client: FakeStoreClient) -> Self {
        Self { client }
    }

    /// Build the HTTP client from the `[api]` config section
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let client = FakeStoreClient::with_base_url(
            config.base_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )?
        .with_retry_config(config.retry_config());

        Ok(Self::new(client))
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }
}

#[async_trait::async_trait]
impl CatalogProvider for FakeStoreProvider {
    async fn fetch_products(&self) -> Result<Vec<Product>> {
        let products = self.client.get_products().await?;
        Ok(products.into_iter().map(Product::from).collect())
    }

    async fn fetch_product(&self, id: ProductId) -> Result<Product> {
        let product = self.client.get_product(id).await?;
        Ok(product.into())
    }

    async fn fetch_categories(&self) -> Result<Vec<String>> {
        Ok(self.client.get_categories().await?)
    }
}
