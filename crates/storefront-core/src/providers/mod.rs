// Where products come from
pub mod fakestore;

pub use fakestore::FakeStoreProvider;

use crate::{
    models::{Product, ProductId},
    Result,
};

/// Source of catalog data
///
/// The store never talks HTTP itself; it only sees completed results coming
/// through this trait, which also keeps tests off the network.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn fetch_products(&self) -> Result<Vec<Product>>;
    async fn fetch_product(&self, id: ProductId) -> Result<Product>;
    async fn fetch_categories(&self) -> Result<Vec<String>>;
}
