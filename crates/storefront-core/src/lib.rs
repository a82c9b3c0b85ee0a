// Core catalog logic - the view engine, favorites, filters and the store that owns them
pub mod catalog;
pub mod config;
pub mod debounce;
pub mod error;
pub mod favorites;
pub mod filters;
pub mod models;
pub mod providers;
pub mod service;
pub mod store;
pub mod view;

pub use catalog::{CatalogAction, CatalogState, RequestId};
pub use config::Config;
pub use debounce::Debouncer;
pub use error::Error;
pub use favorites::{FavoritesAction, FavoritesSet};
pub use filters::{FilterAction, FilterConfig};
pub use models::{Product, ProductId, Rating, SortBy};
pub use providers::{CatalogProvider, FakeStoreProvider};
pub use service::CatalogService;
pub use store::{Action, Store};
pub use view::{compute_view, ViewSelector};

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
