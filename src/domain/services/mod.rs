//! Domain services: catalog filtering, pricing and the checkout flow
pub mod filter;
pub mod pricing;
pub mod checkout;

pub use filter::{filter_products, suggestions, FilterCriteria};
pub use pricing::{CheckoutTotals, FLAT_DELIVERY_FEE, TAX_RATE};
pub use checkout::{validate_form, Checkout, CheckoutError, CheckoutForm, CheckoutState, FieldErrors, GatewayError, MockOrderGateway, OrderGateway};
