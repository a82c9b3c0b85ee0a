use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::retry::{is_retryable_status, with_retry, RetryConfig};

pub const FAKESTORE_API_BASE: &str = "https://fakestoreapi.com";

#[derive(Error, Debug)]
pub enum StoreApiError {
    #[error("Failed to fetch {resource}: {status}")]
    Status {
        resource: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("Product {0} not found")]
    NotFound(u64),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl StoreApiError {
    /// Only transient failures are worth retrying
    pub fn is_retryable(&self) -> bool {
        match self {
            StoreApiError::Status { status, .. } => is_retryable_status(*status),
            StoreApiError::NetworkError(_) => true,
            StoreApiError::NotFound(_)
            | StoreApiError::ParseError(_)
            | StoreApiError::ClientBuild(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreApiError>;

/// Product as the store API serializes it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiProduct {
    pub id: u64,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub rating: Option<ApiRating>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApiRating {
    pub rate: f64,
    pub count: u32,
}

pub struct FakeStoreClient {
    client: reqwest::Client,
    base_url: String,
    retry_config: RetryConfig,
}

impl FakeStoreClient {
    /// Build a client for the store at `base_url` (the public API, a mirror, a local mock)
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("Storefront/0.1.0"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| StoreApiError::ClientBuild(e.to_string()))?;

        let base_url: String = base_url.into();

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry_config: RetryConfig::default(),
        })
    }

    /// Swap in a custom retry configuration
    pub fn with_retry_config(mut self, retry_config: RetryConfig) -> Self {
        self.retry_config = retry_config;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the full product list
    pub async fn get_products(&self) -> Result<Vec<ApiProduct>> {
        info!("Fetching products from {}", self.base_url);
        let body = self.get_body("/products", "products").await?;
        let products = parse_products(&body)?;
        debug!("Received {} products", products.len());
        Ok(products)
    }

    /// Fetch one product by id
    pub async fn get_product(&self, id: u64) -> Result<ApiProduct> {
        info!("Fetching product {}", id);
        let path = format!("/products/{}", id);
        let body = self
            .get_body(&path, "product")
            .await
            .map_err(|e| match e {
                StoreApiError::Status { status, .. } if status == reqwest::StatusCode::NOT_FOUND => {
                    StoreApiError::NotFound(id)
                }
                other => other,
            })?;
        parse_product(&body, id)
    }

    /// Fetch the category names
    pub async fn get_categories(&self) -> Result<Vec<String>> {
        info!("Fetching categories");
        let body = self.get_body("/products/categories", "categories").await?;
        parse_categories(&body)
    }

    async fn get_body(&self, path: &str, resource: &'static str) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);

        with_retry(
            &self.retry_config,
            || async {
                debug!("GET {}", url);
                let response = self.client.get(&url).send().await?;
                let status = response.status();

                if !status.is_success() {
                    return Err(StoreApiError::Status { resource, status });
                }

                Ok(response.text().await?)
            },
            StoreApiError::is_retryable,
        )
        .await
    }
}

fn parse_products(body: &str) -> Result<Vec<ApiProduct>> {
    Ok(serde_json::from_str(body)?)
}

/// The store answers unknown ids with 200 and an empty body, so that has to
/// be treated as "not found" rather than a parse failure
fn parse_product(body: &str, id: u64) -> Result<ApiProduct> {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Err(StoreApiError::NotFound(id));
    }
    Ok(serde_json::from_str(trimmed)?)
}

fn parse_categories(body: &str) -> Result<Vec<String>> {
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRODUCTS_JSON: &str = r#"[
        {
            "id": 1,
            "title": "Fjallraven - Foldsack No. 1 Backpack",
            "price": 109.95,
            "description": "Your perfect pack for everyday use",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        },
        {
            "id": 9,
            "title": "WD 2TB Elements Portable External Hard Drive",
            "price": 64,
            "description": "USB 3.0 and USB 2.0 compatibility",
            "category": "electronics",
            "image": "https://fakestoreapi.com/img/61IBBVJvSDL._AC_SY879_.jpg"
        }
    ]"#;

    #[test]
    fn test_parse_products() {
        let products = parse_products(PRODUCTS_JSON).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, 1);
        assert_eq!(products[0].category, "men's clothing");
        assert_eq!(
            products[0].rating,
            Some(ApiRating {
                rate: 3.9,
                count: 120
            })
        );
        // Integer prices are still prices
        assert_eq!(products[1].price, 64.0);
        assert!(products[1].rating.is_none());
    }

    #[test]
    fn test_parse_product_empty_body_is_not_found() {
        assert!(matches!(parse_product("", 42), Err(StoreApiError::NotFound(42))));
        assert!(matches!(parse_product("  \n", 7), Err(StoreApiError::NotFound(7))));
        assert!(matches!(parse_product("null", 3), Err(StoreApiError::NotFound(3))));
    }

    #[test]
    fn test_parse_product_malformed_body() {
        let err = parse_product("{\"id\": \"nope\"}", 1).unwrap_err();
        assert!(matches!(err, StoreApiError::ParseError(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_parse_categories() {
        let categories =
            parse_categories(r#"["electronics","jewelery","men's clothing","women's clothing"]"#)
                .unwrap();
        assert_eq!(categories.len(), 4);
        assert_eq!(categories[0], "electronics");
    }

    #[test]
    fn test_status_error_message() {
        let err = StoreApiError::Status {
            resource: "products",
            status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
        };
        assert_eq!(
            err.to_string(),
            "Failed to fetch products: 503 Service Unavailable"
        );
        assert!(err.is_retryable());

        let err = StoreApiError::Status {
            resource: "product",
            status: reqwest::StatusCode::BAD_REQUEST,
        };
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client =
            FakeStoreClient::with_base_url("http://localhost:8080/", Duration::from_secs(1))
                .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }
}
