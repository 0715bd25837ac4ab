//! OpenSASE Storefront
//!
//! Client-side storefront core: catalog access, filtering and search
//! suggestions, cart and wishlist stores, and a mock checkout.
//!
//! ## Features
//! - Catalog source over a fakestore-style REST API
//! - Category and free-text filtering with autocomplete suggestions
//! - Cart with derived totals and a favourites wishlist
//! - Checkout validation, flat tax and delivery pricing, order submission

use thiserror::Error;

pub mod catalog;
pub mod config;
pub mod domain;
pub mod session;

pub use catalog::{CatalogError, CatalogSnapshot, CatalogSource, CatalogTask, HttpCatalog, MemoryCatalog};
pub use config::{Config, ConfigError};
pub use domain::aggregates::{AddOutcome, Cart, CartLine, Order, Product, Wishlist};
pub use domain::events::{DomainEvent, Notice, Notifier, Severity};
pub use domain::services::{filter_products, suggestions, Checkout, CheckoutError, CheckoutForm, CheckoutTotals, FilterCriteria};
pub use domain::value_objects::{Money, ProductId, Rating};
pub use session::StorefrontSession;

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum StorefrontError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),
}

pub type Result<T> = std::result::Result<T, StorefrontError>;
