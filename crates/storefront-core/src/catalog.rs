// Catalog state - what the fetch layer has delivered so far
use tracing::{debug, warn};

use crate::models::{Product, ProductId};

/// Identifies one product-detail request so late answers can be told apart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Fetch lifecycle events
///
/// Errors arrive already rendered as text, that's all the screens need.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogAction {
    ProductsRequested,
    ProductsLoaded(Result<Vec<Product>, String>),
    ProductRequested {
        request_id: RequestId,
        product_id: ProductId,
    },
    ProductLoaded {
        request_id: RequestId,
        result: Result<Product, String>,
    },
    ClearSelectedProduct,
    CategoriesRequested,
    CategoriesLoaded(Result<Vec<String>, String>),
}

#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    items: Vec<Product>,
    categories: Vec<String>,
    selected_product: Option<Product>,
    loading_products: bool,
    loading_product: bool,
    loading_categories: bool,
    products_error: Option<String>,
    product_error: Option<String>,
    products_loaded: bool,
    // Bumped every time `items` is replaced; keys the memoized view
    revision: u64,
    pending_product: Option<(RequestId, ProductId)>,
    last_request: u64,
}

impl CatalogState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn selected_product(&self) -> Option<&Product> {
        self.selected_product.as_ref()
    }

    pub fn product_by_id(&self, id: ProductId) -> Option<&Product> {
        self.items.iter().find(|p| p.id == id)
    }

    pub fn is_loading_products(&self) -> bool {
        self.loading_products
    }

    pub fn is_loading_product(&self) -> bool {
        self.loading_product
    }

    pub fn is_loading_categories(&self) -> bool {
        self.loading_categories
    }

    pub fn products_error(&self) -> Option<&str> {
        self.products_error.as_deref()
    }

    pub fn product_error(&self) -> Option<&str> {
        self.product_error.as_deref()
    }

    /// Whether a product list has ever arrived. Informational only: the
    /// view engine gets an empty slice either way.
    pub fn is_loaded(&self) -> bool {
        self.products_loaded
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Product id of the detail request still in flight, if any
    pub fn pending_product(&self) -> Option<ProductId> {
        self.pending_product.map(|(_, product_id)| product_id)
    }

    /// Id to use for the next detail request
    pub fn next_request_id(&self) -> RequestId {
        RequestId(self.last_request + 1)
    }

    pub fn reduce(mut self, action: CatalogAction) -> Self {
        self.apply(action);
        self
    }

    fn apply(&mut self, action: CatalogAction) {
        match action {
            CatalogAction::ProductsRequested => {
                self.loading_products = true;
                self.products_error = None;
            }
            CatalogAction::ProductsLoaded(Ok(items)) => {
                self.loading_products = false;
                self.products_error = None;
                self.products_loaded = true;
                self.items = items;
                self.revision += 1;
            }
            CatalogAction::ProductsLoaded(Err(message)) => {
                // Keep whatever we had, the screen shows the error with a retry
                self.loading_products = false;
                self.products_error = Some(message);
            }
            CatalogAction::ProductRequested {
                request_id,
                product_id,
            } => {
                self.loading_product = true;
                self.product_error = None;
                self.pending_product = Some((request_id, product_id));
                self.last_request = self.last_request.max(request_id.value());
            }
            CatalogAction::ProductLoaded { request_id, result } => {
                match self.pending_product {
                    Some((pending, _)) if pending == request_id => {}
                    _ => {
                        debug!("Discarding stale product response {:?}", request_id);
                        return;
                    }
                }

                self.pending_product = None;
                self.loading_product = false;
                match result {
                    Ok(product) => {
                        self.selected_product = Some(product);
                        self.product_error = None;
                    }
                    Err(message) => {
                        self.selected_product = None;
                        self.product_error = Some(message);
                    }
                }
            }
            CatalogAction::ClearSelectedProduct => {
                self.selected_product = None;
                self.product_error = None;
                self.loading_product = false;
                self.pending_product = None;
            }
            CatalogAction::CategoriesRequested => {
                self.loading_categories = true;
            }
            CatalogAction::CategoriesLoaded(Ok(categories)) => {
                self.loading_categories = false;
                self.categories = categories;
            }
            CatalogAction::CategoriesLoaded(Err(message)) => {
                // Category list is a nicety; the filter just offers "all"
                self.loading_categories = false;
                warn!("Failed to load categories: {}", message);
            }
        }
    }
}
