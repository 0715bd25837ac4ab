//! Order Aggregate

use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::domain::aggregates::Cart;
use crate::domain::events::{DomainEvent, OrderEvent};
use crate::domain::services::pricing::CheckoutTotals;
use crate::domain::value_objects::{Money, ProductId};

#[derive(Clone, Debug, PartialEq)]
pub struct Order {
    id: String,
    customer: CustomerDetails,
    items: Vec<LineItem>,
    totals: CheckoutTotals,
    status: OrderStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    events: Vec<DomainEvent>,
}

#[derive(Clone, Debug, PartialEq)] pub struct LineItem { pub product_id: ProductId, pub title: String, pub quantity: u32, pub unit_price: Money, pub total: Money }
#[derive(Clone, Debug, Default, PartialEq, Eq)] pub struct CustomerDetails { pub name: String, pub email: String, pub phone: String, pub address: String, pub city: String, pub zip_code: String }
#[derive(Clone, Debug, Default, PartialEq, Eq)] pub enum OrderStatus { #[default] Pending, Confirmed }

impl Order {
    /// Snapshots the cart. The cart itself is left untouched.
    pub fn from_cart(cart: &Cart, customer: CustomerDetails) -> Result<Self, OrderError> {
        if cart.is_empty() { return Err(OrderError::NoItems); }
        let items = cart.lines().iter().map(|l| LineItem {
            product_id: l.product().id(), title: l.product().title().to_string(), quantity: l.quantity(),
            unit_price: *l.product().price(), total: l.line_total(),
        }).collect();
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4().to_string(), customer, items, totals: CheckoutTotals::for_cart(cart),
            status: OrderStatus::Pending, created_at: now, updated_at: now, events: vec![],
        })
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn customer(&self) -> &CustomerDetails { &self.customer }
    pub fn items(&self) -> &[LineItem] { &self.items }
    pub fn totals(&self) -> &CheckoutTotals { &self.totals }
    pub fn status(&self) -> &OrderStatus { &self.status }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }

    pub fn confirm(&mut self) -> Result<(), OrderError> {
        if self.status == OrderStatus::Confirmed { return Err(OrderError::AlreadyConfirmed); }
        self.status = OrderStatus::Confirmed;
        self.touch();
        self.raise_event(DomainEvent::Order(OrderEvent::Confirmed { order_id: self.id.clone(), total: self.totals.final_total }));
        Ok(())
    }

    pub fn take_events(&mut self) -> Vec<DomainEvent> { std::mem::take(&mut self.events) }
    fn raise_event(&mut self, e: DomainEvent) { self.events.push(e); }
    fn touch(&mut self) { self.updated_at = Utc::now(); }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    #[error("order has no items")]
    NoItems,
    #[error("order already confirmed")]
    AlreadyConfirmed,
}
