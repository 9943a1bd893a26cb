//! Application State

use std::sync::Arc;

use paypal_checkout::PaymentProvider;

/// Shared application state
///
/// Built once at startup, read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    /// Payment provider (PayPal, or the mock in tests)
    pub payments: Arc<dyn PaymentProvider>,
}

impl AppState {
    pub fn new(payments: Arc<dyn PaymentProvider>) -> Self {
        Self { payments }
    }
}
