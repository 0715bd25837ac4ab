//! Product Aggregate
//!
//! Products are owned by the remote catalog; the storefront only reads them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use crate::domain::value_objects::{Money, ProductId, Rating};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProductPayload")]
pub struct Product {
    id: ProductId,
    title: String,
    price: Money,
    category: String,
    description: String,
    image: String,
    rating: Rating,
}

/// Wire shape of a catalog product, checked before it becomes a [`Product`].
#[derive(Deserialize)]
struct ProductPayload {
    id: ProductId,
    title: String,
    price: Decimal,
    category: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    image: String,
    #[serde(default)]
    rating: Rating,
}

impl TryFrom<ProductPayload> for Product {
    type Error = String;

    fn try_from(p: ProductPayload) -> Result<Self, Self::Error> {
        if p.price.is_sign_negative() && !p.price.is_zero() {
            return Err(format!("product {} has negative price {}", p.id, p.price));
        }
        Ok(Product::new(p.id, p.title, p.price, p.category)
            .with_description(p.description)
            .with_image(p.image)
            .with_rating(p.rating))
    }
}

impl Product {
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, price: Decimal, category: impl Into<String>) -> Self {
        Self {
            id: id.into(), title: title.into(), price: Money::new(price.max(Decimal::ZERO)),
            category: category.into(), description: String::new(), image: String::new(), rating: Rating::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self { self.description = description.into(); self }
    pub fn with_image(mut self, image: impl Into<String>) -> Self { self.image = image.into(); self }
    pub fn with_rating(mut self, rating: Rating) -> Self { self.rating = rating; self }

    pub fn id(&self) -> ProductId { self.id }
    pub fn title(&self) -> &str { &self.title }
    pub fn price(&self) -> &Money { &self.price }
    pub fn category(&self) -> &str { &self.category }
    pub fn description(&self) -> &str { &self.description }
    pub fn image(&self) -> &str { &self.image }
    pub fn rating(&self) -> &Rating { &self.rating }

    /// Case-insensitive substring match over title, description and category.
    /// `needle` must already be lowercase.
    pub fn matches_term(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.category.to_lowercase().contains(needle)
    }

    pub fn in_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.to_lowercase()
    }
}
