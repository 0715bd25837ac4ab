//! Session-scoped stores handed to the view layer.

use crate::domain::aggregates::{Cart, Wishlist};
use crate::domain::events::Notifier;

/// Cart and wishlist for one browsing session. Created empty; the two stores
/// never affect each other.
#[derive(Debug, Default)]
pub struct StorefrontSession {
    pub cart: Cart,
    pub wishlist: Wishlist,
}

impl StorefrontSession {
    pub fn new() -> Self { Self::default() }

    /// Both stores report through the same notifier.
    pub fn with_notifier(notifier: Notifier) -> Self {
        Self { cart: Cart::with_notifier(notifier.clone()), wishlist: Wishlist::with_notifier(notifier) }
    }
}
