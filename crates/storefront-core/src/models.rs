use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub type ProductId = u64;

/// A product as fetched from the store - immutable once we have it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub category: String,
    pub image: String,
    pub description: String,
    pub rating: Option<Rating>,
}

/// Average review score (0-5) and how many reviews it's based on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub rate: f64,
    pub count: u32,
}

impl Product {
    /// Rating formatted for display, "N/A" when the store has none
    pub fn rating_label(&self) -> String {
        match self.rating {
            Some(rating) => format!("{:.1} ({} reviews)", rating.rate, rating.count),
            None => "N/A (0 reviews)".to_string(),
        }
    }
}

impl From<storefront_api::ApiProduct> for Product {
    fn from(api: storefront_api::ApiProduct) -> Self {
        Self {
            id: api.id,
            title: api.title,
            price: api.price,
            category: api.category,
            image: api.image,
            description: api.description,
            rating: api.rating.map(|r| Rating {
                rate: r.rate,
                count: r.count,
            }),
        }
    }
}

/// How the visible list is ordered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortBy {
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "price-asc")]
    PriceAscending,
    #[serde(rename = "price-desc")]
    PriceDescending,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::None => "none",
            SortBy::PriceAscending => "price-asc",
            SortBy::PriceDescending => "price-desc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortBy::None => "None",
            SortBy::PriceAscending => "Price: Low to High",
            SortBy::PriceDescending => "Price: High to Low",
        }
    }

    /// Next mode in the none -> asc -> desc cycle
    pub fn next(&self) -> SortBy {
        match self {
            SortBy::None => SortBy::PriceAscending,
            SortBy::PriceAscending => SortBy::PriceDescending,
            SortBy::PriceDescending => SortBy::None,
        }
    }

    pub fn all() -> [SortBy; 3] {
        [SortBy::None, SortBy::PriceAscending, SortBy::PriceDescending]
    }
}

impl std::fmt::Display for SortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(SortBy::None),
            "price-asc" => Ok(SortBy::PriceAscending),
            "price-desc" => Ok(SortBy::PriceDescending),
            other => Err(crate::Error::InvalidSortMode(other.to_string())),
        }
    }
}
