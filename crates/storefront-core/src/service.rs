// Drives the store against a catalog provider
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    catalog::{CatalogAction, RequestId},
    models::ProductId,
    providers::CatalogProvider,
    store::{Action, Store},
};

/// Runs fetches and feeds their outcome back into a [`Store`]
///
/// Two flavours: `load_*` await the provider and dispatch inline (fine for
/// one-shot commands), `spawn_*` run on the runtime and send the finished
/// action over a channel so an event loop can keep drawing meanwhile.
#[derive(Clone)]
pub struct CatalogService {
    provider: Arc<dyn CatalogProvider>,
}

impl CatalogService {
    pub fn new(provider: Arc<dyn CatalogProvider>) -> Self {
        Self { provider }
    }

    pub async fn load_products(&self, store: &mut Store) {
        store.dispatch(CatalogAction::ProductsRequested);
        let action = Self::fetch_products(self.provider.as_ref()).await;
        store.dispatch(action);
    }

    pub async fn load_categories(&self, store: &mut Store) {
        store.dispatch(CatalogAction::CategoriesRequested);
        let action = Self::fetch_categories(self.provider.as_ref()).await;
        store.dispatch(action);
    }

    pub async fn load_product(&self, store: &mut Store, product_id: ProductId) {
        let request_id = store.request_product(product_id);
        let action = Self::fetch_product(self.provider.as_ref(), request_id, product_id).await;
        store.dispatch(action);
    }

    pub fn spawn_products(&self, store: &mut Store, tx: mpsc::UnboundedSender<Action>) {
        store.dispatch(CatalogAction::ProductsRequested);
        let provider = Arc::clone(&self.provider);
        tokio::spawn(async move {
            let action = Self::fetch_products(provider.as_ref()).await;
            if tx.send(action.into()).is_err() {
                debug!("Store gone before products arrived");
            }
        });
    }

    pub fn spawn_categories(&self, store: &mut Store, tx: mpsc::UnboundedSender<Action>) {
        store.dispatch(CatalogAction::CategoriesRequested);
        let provider = Arc::clone(&self.provider);
        tokio::spawn(async move {
            let action = Self::fetch_categories(provider.as_ref()).await;
            if tx.send(action.into()).is_err() {
                debug!("Store gone before categories arrived");
            }
        });
    }

    /// Start a detail fetch; superseded requests are dropped by the store
    pub fn spawn_product(
        &self,
        store: &mut Store,
        product_id: ProductId,
        tx: mpsc::UnboundedSender<Action>,
    ) -> RequestId {
        let request_id = store.request_product(product_id);
        let provider = Arc::clone(&self.provider);
        tokio::spawn(async move {
            let action = Self::fetch_product(provider.as_ref(), request_id, product_id).await;
            if tx.send(action.into()).is_err() {
                debug!("Store gone before product {} arrived", product_id);
            }
        });
        request_id
    }

    async fn fetch_products(provider: &dyn CatalogProvider) -> CatalogAction {
        let result = provider.fetch_products().await.map_err(|e| {
            warn!("Loading products failed: {}", e);
            e.to_string()
        });
        if let Ok(products) = &result {
            info!("Loaded {} products", products.len());
        }
        CatalogAction::ProductsLoaded(result)
    }

    async fn fetch_categories(provider: &dyn CatalogProvider) -> CatalogAction {
        let result = provider.fetch_categories().await.map_err(|e| e.to_string());
        CatalogAction::CategoriesLoaded(result)
    }

    async fn fetch_product(
        provider: &dyn CatalogProvider,
        request_id: RequestId,
        product_id: ProductId,
    ) -> CatalogAction {
        let result = provider.fetch_product(product_id).await.map_err(|e| {
            warn!("Loading product {} failed: {}", product_id, e);
            e.to_string()
        });
        CatalogAction::ProductLoaded { request_id, result }
    }
}
