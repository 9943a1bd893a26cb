//! Payment Provider Abstraction

use async_trait::async_trait;

use crate::error::Result;
use crate::payment::{Payment, PaymentSpec};

/// Payment provider trait (Strategy pattern)
///
/// The two-step create/execute lifecycle is enforced by the provider.
/// Callers only see whether each step succeeded.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a payment awaiting buyer approval
    async fn create(&self, spec: &PaymentSpec) -> Result<Payment>;

    /// Look up an existing payment
    async fn find(&self, payment_id: &str) -> Result<Payment>;

    /// Execute (capture) an approved payment
    ///
    /// Not idempotent on this side: every call reaches the provider.
    async fn execute(&self, payment_id: &str, payer_id: Option<&str>) -> Result<Payment>;

    /// Provider name
    fn name(&self) -> &str;
}
