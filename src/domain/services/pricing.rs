//! Checkout pricing
//!
//! Totals are derived from the cart on demand and never stored on it.

use rust_decimal::Decimal;
use crate::domain::aggregates::Cart;
use crate::domain::value_objects::Money;

/// 18% flat tax.
pub const TAX_RATE: Decimal = Decimal::from_parts(18, 0, 0, false, 2);
/// Flat delivery fee, no free-shipping threshold.
pub const FLAT_DELIVERY_FEE: Decimal = Decimal::from_parts(599, 0, 0, false, 2);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CheckoutTotals {
    pub subtotal: Money,
    pub tax_amount: Money,
    pub delivery_charge: Money,
    pub final_total: Money,
}

impl CheckoutTotals {
    pub fn from_subtotal(subtotal: Money) -> Self {
        let tax_amount = subtotal.scale(TAX_RATE);
        let delivery_charge = Money::new(FLAT_DELIVERY_FEE);
        let final_total = subtotal.add(&tax_amount).add(&delivery_charge);
        Self { subtotal, tax_amount, delivery_charge, final_total }
    }

    pub fn for_cart(cart: &Cart) -> Self { Self::from_subtotal(cart.total_price()) }
}
