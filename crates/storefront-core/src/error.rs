use thiserror::Error;

use crate::models::ProductId;

/// Everything that can go wrong outside the pure engine
///
/// The view composer, favorites and filters are total functions and never
/// produce one of these. Fetches, config files and boundary parsing do.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    ApiError(String),

    #[error("Product {0} not found")]
    NotFound(ProductId),

    #[error("Invalid sort mode '{0}' (expected none, price-asc or price-desc)")]
    InvalidSortMode(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<storefront_api::StoreApiError> for Error {
    fn from(err: storefront_api::StoreApiError) -> Self {
        match err {
            storefront_api::StoreApiError::NotFound(id) => Error::NotFound(id),
            other => Error::ApiError(other.to_string()),
        }
    }
}
