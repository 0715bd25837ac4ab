//! Cart Aggregate

use std::fmt;
use tracing::debug;
use crate::domain::aggregates::Product;
use crate::domain::events::{CartEvent, DomainEvent, Notifier};
use crate::domain::value_objects::{Money, ProductId, Quantity};

#[derive(Clone, Debug, PartialEq)]
pub struct CartLine {
    product: Product,
    quantity: Quantity,
}

impl CartLine {
    pub fn product(&self) -> &Product { &self.product }
    pub fn quantity(&self) -> u32 { self.quantity.value() }
    pub fn line_total(&self) -> Money { self.product.price().multiply(self.quantity.value()) }
}

/// Whether `add_to_cart` created a line or bumped an existing one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddOutcome { Added, QuantityIncreased }

/// Session-scoped cart. Lines keep first-added-first order and there is at
/// most one line per product id. Totals are derived on every read.
#[derive(Default)]
pub struct Cart {
    lines: Vec<CartLine>,
    notifier: Option<Notifier>,
}

impl Cart {
    pub fn new() -> Self { Self::default() }

    pub fn with_notifier(notifier: Notifier) -> Self {
        Self { lines: vec![], notifier: Some(notifier) }
    }

    pub fn lines(&self) -> &[CartLine] { &self.lines }
    pub fn is_empty(&self) -> bool { self.lines.is_empty() }
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> { self.lines.iter().find(|l| l.product.id() == product_id) }
    pub fn total_items(&self) -> u32 { self.lines.iter().map(|l| l.quantity.value()).sum() }
    pub fn total_price(&self) -> Money { self.lines.iter().map(CartLine::line_total).sum() }

    pub fn add_to_cart(&mut self, product: &Product) -> AddOutcome {
        let (outcome, event) = self.insert(product);
        self.notify(event);
        outcome
    }

    /// Same as [`Cart::add_to_cart`] without notifying.
    pub fn add_to_cart_quietly(&mut self, product: &Product) -> AddOutcome {
        self.insert(product).0
    }

    pub fn remove_from_cart(&mut self, product_id: ProductId) {
        let before = self.lines.len();
        self.lines.retain(|l| l.product.id() != product_id);
        if self.lines.len() != before {
            debug!(%product_id, "removed cart line");
            self.notify(CartEvent::ItemRemoved { product_id });
        }
    }

    /// Sets the absolute quantity of a line. Zero or negative removes it.
    pub fn update_quantity(&mut self, product_id: ProductId, new_quantity: i64) {
        if new_quantity <= 0 {
            return self.remove_from_cart(product_id);
        }
        let value = u32::try_from(new_quantity).unwrap_or(u32::MAX);
        let Some(quantity) = Quantity::new(value) else { return };
        let Some(line) = self.lines.iter_mut().find(|l| l.product.id() == product_id) else { return };
        if line.quantity == quantity { return; }
        line.quantity = quantity;
        debug!(%product_id, quantity = value, "updated cart quantity");
        self.notify(CartEvent::QuantityUpdated { product_id, quantity: value });
    }

    pub fn clear(&mut self) {
        if self.lines.is_empty() { return; }
        self.lines.clear();
        debug!("cleared cart");
        self.notify(CartEvent::Cleared);
    }

    fn insert(&mut self, product: &Product) -> (AddOutcome, CartEvent) {
        let product_id = product.id();
        if let Some(existing) = self.lines.iter_mut().find(|l| l.product.id() == product_id) {
            existing.quantity = existing.quantity.increment();
            let quantity = existing.quantity.value();
            debug!(%product_id, quantity, "increased cart quantity");
            return (AddOutcome::QuantityIncreased, CartEvent::QuantityIncreased { product_id, title: product.title().to_string(), quantity });
        }
        self.lines.push(CartLine { product: product.clone(), quantity: Quantity::one() });
        debug!(%product_id, "added cart line");
        (AddOutcome::Added, CartEvent::ItemAdded { product_id, title: product.title().to_string() })
    }

    fn notify(&self, event: CartEvent) {
        if let Some(notifier) = &self.notifier { notifier(&DomainEvent::Cart(event)); }
    }
}

impl fmt::Debug for Cart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cart").field("lines", &self.lines).field("notifier", &self.notifier.is_some()).finish()
    }
}
