//! Wishlist Aggregate

use std::collections::HashSet;
use std::fmt;
use tracing::debug;
use crate::domain::aggregates::Product;
use crate::domain::events::{DomainEvent, Notifier, WishlistEvent};
use crate::domain::value_objects::ProductId;

/// Set of favourited products, unique by id. Independent of the cart.
#[derive(Default)]
pub struct Wishlist {
    items: Vec<Product>,
    index: HashSet<ProductId>,
    notifier: Option<Notifier>,
}

impl Wishlist {
    pub fn new() -> Self { Self::default() }

    pub fn with_notifier(notifier: Notifier) -> Self {
        Self { notifier: Some(notifier), ..Self::default() }
    }

    pub fn items(&self) -> &[Product] { &self.items }
    pub fn total_items(&self) -> usize { self.index.len() }
    pub fn is_empty(&self) -> bool { self.index.is_empty() }
    pub fn is_in_wishlist(&self, product_id: ProductId) -> bool { self.index.contains(&product_id) }

    pub fn add_to_wishlist(&mut self, product: &Product) {
        if !self.index.insert(product.id()) { return; }
        self.items.push(product.clone());
        debug!(product_id = %product.id(), "added to wishlist");
        self.notify(WishlistEvent::Added { product_id: product.id(), title: product.title().to_string() });
    }

    pub fn remove_from_wishlist(&mut self, product_id: ProductId) {
        if !self.index.remove(&product_id) { return; }
        let Some(pos) = self.items.iter().position(|p| p.id() == product_id) else { return };
        let removed = self.items.remove(pos);
        debug!(%product_id, "removed from wishlist");
        self.notify(WishlistEvent::Removed { product_id, title: removed.title().to_string() });
    }

    /// Adds when absent, removes when present. Returns the new membership.
    pub fn toggle(&mut self, product: &Product) -> bool {
        if self.is_in_wishlist(product.id()) {
            self.remove_from_wishlist(product.id());
            false
        } else {
            self.add_to_wishlist(product);
            true
        }
    }

    fn notify(&self, event: WishlistEvent) {
        if let Some(notifier) = &self.notifier { notifier(&DomainEvent::Wishlist(event)); }
    }
}

impl fmt::Debug for Wishlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wishlist").field("items", &self.items).field("notifier", &self.notifier.is_some()).finish()
    }
}
