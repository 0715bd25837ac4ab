//! Checkout flow
//!
//! `Idle → Validating → Submitting → Completed`. Validation and submission
//! failures fall back to `Idle` and leave the cart as it was; only a
//! successful submission clears it.

use std::collections::BTreeMap;
use std::time::Duration;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, warn};
use validator::{Validate, ValidationError, ValidationErrors};
use crate::config::Config;
use crate::domain::aggregates::{Cart, CustomerDetails, Order, OrderError};
use crate::domain::events::Notifier;

/// Field name → message, empty when the form is valid.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Validate)]
pub struct CheckoutForm {
    #[validate(custom = "required")]
    pub name: String,
    #[validate(custom = "email_shape")]
    pub email: String,
    #[validate(custom = "ten_digit_phone")]
    pub phone: String,
    #[validate(custom = "required")]
    pub address: String,
    #[validate(custom = "required")]
    pub city: String,
    #[validate(custom = "zip_code")]
    pub zip_code: String,
}

impl From<CheckoutForm> for CustomerDetails {
    fn from(f: CheckoutForm) -> Self {
        Self { name: f.name, email: f.email, phone: f.phone, address: f.address, city: f.city, zip_code: f.zip_code }
    }
}

fn required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() { Err(ValidationError::new("required")) } else { Ok(()) }
}

fn email_shape(value: &str) -> Result<(), ValidationError> {
    required(value)?;
    if looks_like_email(value) { Ok(()) } else { Err(ValidationError::new("email")) }
}

fn ten_digit_phone(value: &str) -> Result<(), ValidationError> {
    required(value)?;
    let digits: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.len() == 10 && digits.chars().all(|c| c.is_ascii_digit()) { Ok(()) } else { Err(ValidationError::new("phone")) }
}

fn zip_code(value: &str) -> Result<(), ValidationError> {
    required(value)?;
    if (5..=6).contains(&value.len()) && value.chars().all(|c| c.is_ascii_digit()) { Ok(()) } else { Err(ValidationError::new("zip_code")) }
}

/// `x@y.z` shape: some non-space text, `@`, then a non-space run holding a
/// dot with text on both sides.
fn looks_like_email(value: &str) -> bool {
    value.char_indices().filter(|&(_, c)| c == '@').any(|(at, _)| {
        let before = value[..at].chars().next_back().is_some_and(|c| !c.is_whitespace());
        let domain: String = value[at + 1..].chars().take_while(|c| !c.is_whitespace()).collect();
        let chars: Vec<char> = domain.chars().collect();
        let dotted = (1..chars.len().saturating_sub(1)).any(|i| chars[i] == '.');
        before && dotted
    })
}

fn message(field: &str, code: &str) -> &'static str {
    match (field, code) {
        ("name", _) => "Name is required",
        ("email", "required") => "Email is required",
        ("email", _) => "Please enter a valid email",
        ("phone", "required") => "Phone number is required",
        ("phone", _) => "Please enter a valid 10-digit phone number",
        ("address", _) => "Address is required",
        ("city", _) => "City is required",
        ("zip_code", "required") => "ZIP code is required",
        ("zip_code", _) => "Please enter a valid ZIP code",
        _ => "Invalid value",
    }
}

fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errs)| errs.first().map(|e| (field.to_string(), message(field, &e.code).to_string())))
        .collect()
}

/// Checks every field and collects one message per failing field.
pub fn validate_form(form: &CheckoutForm) -> FieldErrors {
    match form.validate() {
        Ok(()) => FieldErrors::new(),
        Err(e) => field_errors(&e),
    }
}

/// External order/payment API.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    async fn place_order(&self, order: &Order) -> Result<(), GatewayError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("order service unavailable: {0}")]
    Unavailable(String),
    #[error("order rejected: {0}")]
    Rejected(String),
}

/// Stand-in gateway: waits a fixed delay and accepts every order.
#[derive(Debug, Clone)]
pub struct MockOrderGateway {
    delay: Duration,
}

impl MockOrderGateway {
    pub fn new(delay: Duration) -> Self { Self { delay } }
    pub fn from_config(config: &Config) -> Self { Self::new(config.checkout_delay) }
    pub fn delay(&self) -> Duration { self.delay }
}

#[async_trait]
impl OrderGateway for MockOrderGateway {
    async fn place_order(&self, order: &Order) -> Result<(), GatewayError> {
        tokio::time::sleep(self.delay).await;
        info!(order_id = order.id(), "mock order accepted");
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum CheckoutState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Completed(Order),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,
    #[error("{} field(s) failed validation", .0.len())]
    Invalid(FieldErrors),
    #[error("order submission failed: {0}")]
    Submission(#[from] GatewayError),
    #[error("order submission timed out after {0:?}")]
    Timeout(Duration),
    #[error("checkout already completed")]
    AlreadyCompleted,
    #[error(transparent)]
    Order(#[from] OrderError),
}

impl CheckoutError {
    /// Whether resubmitting the same form may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Submission(GatewayError::Unavailable(_)) | Self::Timeout(_))
    }
}

pub struct Checkout<G> {
    gateway: G,
    timeout: Duration,
    state: CheckoutState,
    errors: FieldErrors,
    notifier: Option<Notifier>,
}

/// Holds the flow in `Submitting`; dropping it before `complete` returns to `Idle`.
struct SubmitGuard<'a> {
    state: &'a mut CheckoutState,
}

impl<'a> SubmitGuard<'a> {
    fn enter(state: &'a mut CheckoutState) -> Self {
        *state = CheckoutState::Submitting;
        Self { state }
    }

    fn complete(self, order: Order) { *self.state = CheckoutState::Completed(order); }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        if matches!(self.state, CheckoutState::Submitting) { *self.state = CheckoutState::Idle; }
    }
}

impl Checkout<MockOrderGateway> {
    /// Mock gateway delay and submission timeout taken from `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(MockOrderGateway::from_config(config), config.checkout_timeout)
    }
}

impl<G: OrderGateway> Checkout<G> {
    pub fn new(gateway: G, timeout: Duration) -> Self {
        Self { gateway, timeout, state: CheckoutState::Idle, errors: FieldErrors::new(), notifier: None }
    }

    pub fn with_notifier(mut self, notifier: Notifier) -> Self { self.notifier = Some(notifier); self }

    pub fn state(&self) -> &CheckoutState { &self.state }
    pub fn errors(&self) -> &FieldErrors { &self.errors }

    /// Field error for `field`, if the last validation flagged it.
    pub fn error_for(&self, field: &str) -> Option<&str> { self.errors.get(field).map(String::as_str) }

    /// Clears the error for a field the user is editing.
    pub fn clear_error(&mut self, field: &str) { self.errors.remove(field); }

    /// Validates, submits and, on success, clears the cart. The cart is left
    /// unchanged on every error path.
    pub async fn submit(&mut self, cart: &mut Cart, form: &CheckoutForm) -> Result<Order, CheckoutError> {
        if matches!(self.state, CheckoutState::Completed(_)) { return Err(CheckoutError::AlreadyCompleted); }
        if cart.is_empty() { return Err(CheckoutError::EmptyCart); }

        self.state = CheckoutState::Validating;
        self.errors = validate_form(form);
        if !self.errors.is_empty() {
            info!(fields = self.errors.len(), "checkout validation failed");
            self.state = CheckoutState::Idle;
            return Err(CheckoutError::Invalid(self.errors.clone()));
        }

        let mut order = Order::from_cart(cart, form.clone().into())?;
        let guard = SubmitGuard::enter(&mut self.state);
        info!(order_id = order.id(), total = %order.totals().final_total, "submitting order");

        let outcome = match tokio::time::timeout(self.timeout, self.gateway.place_order(&order)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(CheckoutError::Submission(e)),
            Err(_) => Err(CheckoutError::Timeout(self.timeout)),
        };
        if let Err(e) = outcome {
            warn!(order_id = order.id(), error = %e, "order submission failed");
            return Err(e);
        }

        order.confirm()?;
        cart.clear();
        for event in order.take_events() {
            if let Some(notifier) = &self.notifier { notifier(&event); }
        }
        info!(order_id = order.id(), "order completed");
        guard.complete(order.clone());
        Ok(order)
    }

    /// Leaves `Completed` for a fresh checkout. Returns the finished order.
    pub fn reset(&mut self) -> Option<Order> {
        self.errors.clear();
        match std::mem::take(&mut self.state) {
            CheckoutState::Completed(order) => Some(order),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::Product;
    use rust_decimal::Decimal;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn valid_form() -> CheckoutForm {
        CheckoutForm {
            name: "Ada Lovelace".into(), email: "ada@example.com".into(), phone: "98765 43210".into(),
            address: "12 Analytical Way".into(), city: "London".into(), zip_code: "560001".into(),
        }
    }

    fn cart_with_item() -> Cart {
        let mut cart = Cart::new();
        cart.add_to_cart(&Product::new(1u64, "Widget", Decimal::new(10000, 2), "tools"));
        cart
    }

    struct FailingGateway { calls: AtomicUsize }

    #[async_trait]
    impl OrderGateway for FailingGateway {
        async fn place_order(&self, _order: &Order) -> Result<(), GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(GatewayError::Unavailable("503".into()))
        }
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        assert!(validate_form(&valid_form()).is_empty());
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let errors = validate_form(&CheckoutForm::default());
        assert_eq!(errors.len(), 6);
        assert_eq!(errors["name"], "Name is required");
        assert_eq!(errors["email"], "Email is required");
        assert_eq!(errors["phone"], "Phone number is required");
        assert_eq!(errors["zip_code"], "ZIP code is required");
    }

    #[test]
    fn test_format_checks() {
        let form = CheckoutForm { email: "ada@example".into(), phone: "12345".into(), zip_code: "1234a".into(), ..valid_form() };
        let errors = validate_form(&form);
        assert_eq!(errors["email"], "Please enter a valid email");
        assert_eq!(errors["phone"], "Please enter a valid 10-digit phone number");
        assert_eq!(errors["zip_code"], "Please enter a valid ZIP code");
        assert!(!errors.contains_key("name"));
    }

    #[test]
    fn test_email_shape() {
        assert!(looks_like_email("a@b.c"));
        assert!(looks_like_email("first.last@mail.example.org"));
        assert!(!looks_like_email("@b.c"));
        assert!(!looks_like_email("a@.c"));
        assert!(!looks_like_email("a@b."));
        assert!(!looks_like_email("a @b.c"));
    }

    #[tokio::test]
    async fn test_successful_checkout_clears_cart() {
        let mut cart = cart_with_item();
        let mut checkout = Checkout::new(MockOrderGateway::new(Duration::from_millis(5)), Duration::from_secs(1));
        let order = checkout.submit(&mut cart, &valid_form()).await.unwrap();
        assert_eq!(order.totals().final_total.amount(), Decimal::new(12399, 2));
        assert!(cart.is_empty());
        assert!(matches!(checkout.state(), CheckoutState::Completed(_)));

        let again = checkout.submit(&mut cart_with_item(), &valid_form()).await;
        assert_eq!(again.unwrap_err(), CheckoutError::AlreadyCompleted);
        assert!(checkout.reset().is_some());
        assert_eq!(checkout.state(), &CheckoutState::Idle);
    }

    #[tokio::test]
    async fn test_completion_is_announced() {
        let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = seen.clone();
        let notifier: Notifier = std::sync::Arc::new(move |e: &crate::domain::events::DomainEvent| {
            sink.lock().unwrap().extend(e.notice());
        });
        let mut checkout = Checkout::new(MockOrderGateway::new(Duration::ZERO), Duration::from_secs(1)).with_notifier(notifier);
        checkout.submit(&mut cart_with_item(), &valid_form()).await.unwrap();
        let notices = seen.lock().unwrap();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].message, "Order placed successfully! Total: $123.99");
    }

    #[tokio::test]
    async fn test_invalid_form_returns_to_idle() {
        let mut cart = cart_with_item();
        let mut checkout = Checkout::new(MockOrderGateway::new(Duration::ZERO), Duration::from_secs(1));
        let form = CheckoutForm { city: "  ".into(), ..valid_form() };
        let err = checkout.submit(&mut cart, &form).await.unwrap_err();
        assert!(matches!(err, CheckoutError::Invalid(ref e) if e.len() == 1));
        assert_eq!(checkout.error_for("city"), Some("City is required"));
        assert_eq!(checkout.state(), &CheckoutState::Idle);
        assert_eq!(cart.total_items(), 1);
        checkout.clear_error("city");
        assert!(checkout.errors().is_empty());
    }

    #[tokio::test]
    async fn test_gateway_failure_leaves_cart() {
        let mut cart = cart_with_item();
        let mut checkout = Checkout::new(FailingGateway { calls: AtomicUsize::new(0) }, Duration::from_secs(1));
        let err = checkout.submit(&mut cart, &valid_form()).await.unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(checkout.state(), &CheckoutState::Idle);
        assert_eq!(cart.total_items(), 1);
        assert_eq!(checkout.gateway.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_slow_gateway_times_out() {
        let mut cart = cart_with_item();
        let mut checkout = Checkout::new(MockOrderGateway::new(Duration::from_secs(5)), Duration::from_millis(20));
        let err = checkout.submit(&mut cart, &valid_form()).await.unwrap_err();
        assert_eq!(err, CheckoutError::Timeout(Duration::from_millis(20)));
        assert!(err.is_retryable());
        assert!(!cart.is_empty());
    }

    struct HangingGateway;

    #[async_trait]
    impl OrderGateway for HangingGateway {
        async fn place_order(&self, _order: &Order) -> Result<(), GatewayError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_abandoned_submit_returns_to_idle() {
        let mut cart = cart_with_item();
        let mut checkout = Checkout::new(HangingGateway, Duration::from_secs(60));
        let abandoned = tokio::time::timeout(Duration::from_millis(20), checkout.submit(&mut cart, &valid_form())).await;
        assert!(abandoned.is_err());
        assert_eq!(checkout.state(), &CheckoutState::Idle);
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_from_config_uses_checkout_settings() {
        let config = Config { checkout_delay: Duration::from_millis(7), checkout_timeout: Duration::from_millis(90), ..Config::default() };
        let checkout = Checkout::from_config(&config);
        assert_eq!(checkout.gateway.delay(), Duration::from_millis(7));
        assert_eq!(checkout.timeout, Duration::from_millis(90));
        assert_eq!(checkout.state(), &CheckoutState::Idle);
    }

    #[tokio::test]
    async fn test_empty_cart_rejected() {
        let mut checkout = Checkout::new(MockOrderGateway::new(Duration::ZERO), Duration::from_secs(1));
        let err = checkout.submit(&mut Cart::new(), &valid_form()).await.unwrap_err();
        assert_eq!(err, CheckoutError::EmptyCart);
    }
}
