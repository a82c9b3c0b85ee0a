// The single owner of all catalog state
use crate::{
    catalog::{CatalogAction, CatalogState, RequestId},
    favorites::{FavoritesAction, FavoritesSet},
    filters::{FilterAction, FilterConfig},
    models::{Product, ProductId},
    view::ViewSelector,
};

/// Anything that can change state, routed to the slice that owns it
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Catalog(CatalogAction),
    Filter(FilterAction),
    Favorites(FavoritesAction),
}

impl From<CatalogAction> for Action {
    fn from(action: CatalogAction) -> Self {
        Action::Catalog(action)
    }
}

impl From<FilterAction> for Action {
    fn from(action: FilterAction) -> Self {
        Action::Filter(action)
    }
}

impl From<FavoritesAction> for Action {
    fn from(action: FavoritesAction) -> Self {
        Action::Favorites(action)
    }
}

/// Catalog, filters and favorites behind one dispatch entry point
///
/// Every mutation goes through [`Store::dispatch`]; screens read through the
/// accessors. The visible product list is refreshed after each dispatch and
/// only recomputed when the catalog or the filters actually changed.
#[derive(Debug, Default)]
pub struct Store {
    catalog: CatalogState,
    filters: FilterConfig,
    favorites: FavoritesSet,
    view: ViewSelector,
}

impl Store {
    pub fn new() -> Self {
        let mut store = Self::default();
        store.refresh_view();
        store
    }

    pub fn dispatch(&mut self, action: impl Into<Action>) {
        match action.into() {
            Action::Catalog(action) => {
                self.catalog = std::mem::take(&mut self.catalog).reduce(action);
            }
            Action::Filter(action) => {
                self.filters = std::mem::take(&mut self.filters).reduce(action);
            }
            Action::Favorites(action) => {
                self.favorites = std::mem::take(&mut self.favorites).reduce(action);
            }
        }
        self.refresh_view();
    }

    /// Start a detail request and return its id
    ///
    /// Only the response carrying the most recent id will be accepted.
    pub fn request_product(&mut self, product_id: ProductId) -> RequestId {
        let request_id = self.catalog.next_request_id();
        self.dispatch(CatalogAction::ProductRequested {
            request_id,
            product_id,
        });
        request_id
    }

    pub fn catalog(&self) -> &CatalogState {
        &self.catalog
    }

    pub fn filters(&self) -> &FilterConfig {
        &self.filters
    }

    pub fn favorites(&self) -> &FavoritesSet {
        &self.favorites
    }

    /// The filtered, sorted product list the listing screen shows
    pub fn visible_products(&self) -> &[Product] {
        self.view.products()
    }

    pub fn is_favorite(&self, id: ProductId) -> bool {
        self.favorites.contains(id)
    }

    pub fn favorites_count(&self) -> usize {
        self.favorites.len()
    }

    /// How many times the view was actually recomputed
    pub fn view_recomputations(&self) -> usize {
        self.view.recomputations()
    }

    fn refresh_view(&mut self) {
        self.view
            .select(self.catalog.items(), self.catalog.revision(), &self.filters);
    }
}
