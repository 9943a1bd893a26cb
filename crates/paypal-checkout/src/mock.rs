//! Mock Payment Provider
//!
//! In-memory stand-in for PayPal. Each operation can be told to fail, and
//! every call is recorded so callers can assert on what was sent.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::{PaymentError, Result};
use crate::payment::{Link, Payment, PaymentSpec, PaymentState};
use crate::provider::PaymentProvider;

/// A recorded provider call
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProviderCall {
    Create(PaymentSpec),
    Find(String),
    Execute {
        payment_id: String,
        payer_id: Option<String>,
    },
}

/// Mock provider with scripted outcomes
pub struct MockPaymentProvider {
    payment_id: String,
    links: Vec<Link>,
    fail_create: bool,
    fail_find: bool,
    fail_execute: bool,
    calls: Mutex<Vec<ProviderCall>>,
}

impl Default for MockPaymentProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPaymentProvider {
    /// Every operation succeeds; created payments carry `self` and `approval_url` links
    pub fn new() -> Self {
        Self {
            payment_id: "PAY-MOCK".into(),
            links: vec![
                Link::new("self", "https://api.sandbox.paypal.com/v1/payments/payment/PAY-MOCK"),
                Link::new(
                    "approval_url",
                    "https://www.sandbox.paypal.com/cgi-bin/webscr?cmd=_express-checkout&token=EC-MOCK",
                ),
            ],
            fail_create: false,
            fail_find: false,
            fail_execute: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Links returned on create
    pub fn with_links(mut self, links: Vec<Link>) -> Self {
        self.links = links;
        self
    }

    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    pub fn failing_find(mut self) -> Self {
        self.fail_find = true;
        self
    }

    pub fn failing_execute(mut self) -> Self {
        self.fail_execute = true;
        self
    }

    /// Calls received so far, in order
    pub async fn calls(&self) -> Vec<ProviderCall> {
        self.calls.lock().await.clone()
    }

    /// Number of execute calls received
    pub async fn execute_count(&self) -> usize {
        self.calls
            .lock()
            .await
            .iter()
            .filter(|call| matches!(call, ProviderCall::Execute { .. }))
            .count()
    }

    async fn record(&self, call: ProviderCall) {
        self.calls.lock().await.push(call);
    }

    fn payment(&self, id: &str, state: PaymentState, links: Vec<Link>) -> Payment {
        Payment {
            id: id.to_string(),
            state,
            intent: None,
            create_time: None,
            links,
        }
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create(&self, spec: &PaymentSpec) -> Result<Payment> {
        self.record(ProviderCall::Create(spec.clone())).await;
        if self.fail_create {
            return Err(PaymentError::Simulated("create".into()));
        }
        Ok(self.payment(&self.payment_id, PaymentState::Created, self.links.clone()))
    }

    async fn find(&self, payment_id: &str) -> Result<Payment> {
        self.record(ProviderCall::Find(payment_id.to_string())).await;
        if self.fail_find {
            return Err(PaymentError::Simulated("find".into()));
        }
        Ok(self.payment(payment_id, PaymentState::Created, Vec::new()))
    }

    async fn execute(&self, payment_id: &str, payer_id: Option<&str>) -> Result<Payment> {
        self.record(ProviderCall::Execute {
            payment_id: payment_id.to_string(),
            payer_id: payer_id.map(str::to_string),
        })
        .await;
        if self.fail_execute {
            return Err(PaymentError::Simulated("execute".into()));
        }
        Ok(self.payment(payment_id, PaymentState::Approved, Vec::new()))
    }

    fn name(&self) -> &str {
        "MockPayPal"
    }
}
