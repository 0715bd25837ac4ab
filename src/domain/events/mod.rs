//! Domain events
//!
//! Stores emit these through an optional [`Notifier`] so the view layer can
//! surface feedback without the stores knowing how it is rendered.

use std::sync::Arc;
use crate::domain::value_objects::{Money, ProductId};

/// Callback invoked after a store mutation actually changed state.
pub type Notifier = Arc<dyn Fn(&DomainEvent) + Send + Sync>;

#[derive(Clone, Debug, PartialEq)]
pub enum DomainEvent {
    Cart(CartEvent),
    Wishlist(WishlistEvent),
    Order(OrderEvent),
}

#[derive(Clone, Debug, PartialEq)]
pub enum CartEvent {
    ItemAdded { product_id: ProductId, title: String },
    QuantityIncreased { product_id: ProductId, title: String, quantity: u32 },
    QuantityUpdated { product_id: ProductId, quantity: u32 },
    ItemRemoved { product_id: ProductId },
    Cleared,
}

#[derive(Clone, Debug, PartialEq)]
pub enum WishlistEvent {
    Added { product_id: ProductId, title: String },
    Removed { product_id: ProductId, title: String },
}

#[derive(Clone, Debug, PartialEq)]
pub enum OrderEvent {
    Confirmed { order_id: String, total: Money },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity { Success, Info }

/// User-facing message for an event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
}

impl Notice {
    fn success(message: String) -> Self { Self { message, severity: Severity::Success } }
    fn info(message: String) -> Self { Self { message, severity: Severity::Info } }
}

impl DomainEvent {
    /// The notice to show for this event, if any.
    pub fn notice(&self) -> Option<Notice> {
        match self {
            Self::Cart(CartEvent::ItemAdded { title, .. }) => Some(Notice::success(format!("{title} added to cart!"))),
            Self::Cart(CartEvent::QuantityIncreased { title, .. }) => Some(Notice::info(format!("Updated quantity for {title}"))),
            Self::Cart(_) => None,
            Self::Wishlist(WishlistEvent::Added { title, .. }) => Some(Notice::success(format!("{title} added to wishlist"))),
            Self::Wishlist(WishlistEvent::Removed { title, .. }) => Some(Notice::info(format!("{title} removed from wishlist"))),
            Self::Order(OrderEvent::Confirmed { total, .. }) => Some(Notice::success(format!("Order placed successfully! Total: {total}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_cart_notices() {
        let added = DomainEvent::Cart(CartEvent::ItemAdded { product_id: ProductId::new(1), title: "Backpack".into() });
        assert_eq!(added.notice(), Some(Notice { message: "Backpack added to cart!".into(), severity: Severity::Success }));

        let bumped = DomainEvent::Cart(CartEvent::QuantityIncreased { product_id: ProductId::new(1), title: "Backpack".into(), quantity: 2 });
        assert_eq!(bumped.notice().map(|n| n.severity), Some(Severity::Info));

        assert!(DomainEvent::Cart(CartEvent::Cleared).notice().is_none());
    }

    #[test]
    fn test_order_notice_rounds_total() {
        let e = DomainEvent::Order(OrderEvent::Confirmed { order_id: "o-1".into(), total: Money::new(Decimal::new(123990, 3)) });
        assert_eq!(e.notice().unwrap().message, "Order placed successfully! Total: $123.99");
    }
}
