// API client for the Fake Store REST API
pub mod fakestore;
pub mod retry;

// Re-export common types
pub use fakestore::{ApiProduct, ApiRating, FakeStoreClient, StoreApiError, FAKESTORE_API_BASE};
pub use retry::RetryConfig;
