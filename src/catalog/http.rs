use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, error};
use super::{CatalogError, CatalogSource};
use crate::config::Config;
use crate::domain::aggregates::Product;
use crate::domain::value_objects::ProductId;

/// REST catalog client. Single attempt per call, no retries.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalog {
    pub fn new(config: &Config) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self { client, base_url: config.catalog_base_url.trim_end_matches('/').to_string() })
    }

    pub fn base_url(&self) -> &str { &self.base_url }

    fn url(&self, path: &str) -> String { format!("{}{}", self.base_url, path) }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CatalogError> {
        let url = self.url(path);
        debug!(%url, "fetching catalog");
        let result = match self.fetch(&url).await {
            Ok(body) => decode(&body),
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            error!(%url, error = %e, "catalog request failed");
        }
        result
    }

    async fn fetch(&self, url: &str) -> Result<String, CatalogError> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CatalogError::Status { status: status.as_u16(), url: url.to_string() });
        }
        Ok(resp.text().await?)
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, CatalogError> {
    Ok(serde_json::from_str(body)?)
}

fn category_path(category: &str) -> String {
    let encoded: String = category
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => (b as char).to_string(),
            _ => format!("%{b:02X}"),
        })
        .collect();
    format!("/products/category/{encoded}")
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    async fn get_all_products(&self) -> Result<Vec<Product>, CatalogError> {
        self.get_json("/products").await
    }

    async fn get_categories(&self) -> Result<Vec<String>, CatalogError> {
        self.get_json("/products/categories").await
    }

    async fn get_product_by_id(&self, id: ProductId) -> Result<Product, CatalogError> {
        // fakestore answers unknown ids with 200 and an empty body
        let product: Option<Product> = match self.get_json(&format!("/products/{id}")).await {
            Err(CatalogError::Decode(e)) if e.is_eof() => None,
            other => other?,
        };
        product.ok_or(CatalogError::NotFound(id))
    }

    async fn get_products_by_category(&self, category: &str) -> Result<Vec<Product>, CatalogError> {
        self.get_json(&category_path(category)).await
    }

    async fn get_limited_products(&self, limit: usize) -> Result<Vec<Product>, CatalogError> {
        self.get_json(&format!("/products?limit={limit}")).await
    }
}
