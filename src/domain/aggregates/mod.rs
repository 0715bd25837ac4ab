//! Aggregates module
pub mod product;
pub mod cart;
pub mod wishlist;
pub mod order;

pub use product::Product;
pub use cart::{AddOutcome, Cart, CartLine};
pub use wishlist::Wishlist;
pub use order::{CustomerDetails, LineItem, Order, OrderError, OrderStatus};
