use async_trait::async_trait;
use super::{CatalogError, CatalogSource};
use crate::domain::aggregates::Product;
use crate::domain::value_objects::ProductId;

/// Fixed in-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    products: Vec<Product>,
}

impl MemoryCatalog {
    pub fn new(products: Vec<Product>) -> Self { Self { products } }
}

#[async_trait]
impl CatalogSource for MemoryCatalog {
    async fn get_all_products(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.clone())
    }

    /// Distinct categories in first-seen order.
    async fn get_categories(&self) -> Result<Vec<String>, CatalogError> {
        let mut categories: Vec<String> = Vec::new();
        for p in &self.products {
            if !categories.iter().any(|c| c == p.category()) {
                categories.push(p.category().to_string());
            }
        }
        Ok(categories)
    }

    async fn get_product_by_id(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.products.iter().find(|p| p.id() == id).cloned().ok_or(CatalogError::NotFound(id))
    }

    async fn get_products_by_category(&self, category: &str) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.iter().filter(|p| p.category() == category).cloned().collect())
    }

    async fn get_limited_products(&self, limit: usize) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.iter().take(limit).cloned().collect())
    }
}
