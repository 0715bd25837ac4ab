//! Catalog source
//!
//! The remote product catalog the storefront reads from. [`HttpCatalog`]
//! talks to a fakestore-style REST API; [`MemoryCatalog`] serves a fixed list.

mod http;
mod memory;
mod task;

pub use http::HttpCatalog;
pub use memory::MemoryCatalog;
pub use task::CatalogTask;

use async_trait::async_trait;
use thiserror::Error;
use crate::domain::aggregates::Product;
use crate::domain::services::filter::ALL_CATEGORIES;
use crate::domain::value_objects::ProductId;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("could not decode catalog response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("product {0} not found")]
    NotFound(ProductId),

    #[error("catalog fetch cancelled")]
    Cancelled,
}

#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn get_all_products(&self) -> Result<Vec<Product>, CatalogError>;
    async fn get_categories(&self) -> Result<Vec<String>, CatalogError>;
    async fn get_product_by_id(&self, id: ProductId) -> Result<Product, CatalogError>;
    async fn get_products_by_category(&self, category: &str) -> Result<Vec<Product>, CatalogError>;
    async fn get_limited_products(&self, limit: usize) -> Result<Vec<Product>, CatalogError>;
}

/// Products and category names fetched together for one page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CatalogSnapshot {
    pub products: Vec<Product>,
    pub categories: Vec<String>,
}

impl CatalogSnapshot {
    /// Fetches products and categories concurrently.
    pub async fn load(source: &dyn CatalogSource) -> Result<Self, CatalogError> {
        let (products, categories) = tokio::try_join!(source.get_all_products(), source.get_categories())?;
        Ok(Self { products, categories })
    }

    /// Category selector entries, led by the "all" sentinel.
    pub fn category_options(&self) -> Vec<String> {
        std::iter::once(ALL_CATEGORIES.to_string()).chain(self.categories.iter().cloned()).collect()
    }
}
