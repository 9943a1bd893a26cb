//! # paypal-checkout
//!
//! PayPal hosted checkout integration.
//!
//! ## Flow
//!
//! **Create, approve, execute:** your site creates a payment, the buyer
//! approves it on PayPal, PayPal redirects back and your site executes it.
//!
//! ```text
//! ┌─────────────┐  create  ┌─────────────────┐  return_url  ┌─────────────┐
//! │  Your Site  │─────────▶│  PayPal Hosted  │─────────────▶│  Your Site  │
//! │ (checkout)  │          │  Approval Page  │              │  (execute)  │
//! └─────────────┘          └─────────────────┘              └─────────────┘
//! ```
//!
//! The lifecycle itself is enforced by PayPal. This crate exposes it as the
//! [`PaymentProvider`] trait, with [`PayPalClient`] for the real REST API and
//! [`MockPaymentProvider`] for tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use paypal_checkout::{PayPalClient, PaymentProvider, PaymentSpec, RedirectUrls};
//! use rust_decimal_macros::dec;
//!
//! let client = PayPalClient::from_env()?;
//!
//! let payment = client.create(&PaymentSpec::sale(
//!     RedirectUrls {
//!         return_url: "https://yoursite.com/execute-payment".into(),
//!         cancel_url: "https://yoursite.com/payment-failed".into(),
//!     },
//!     dec!(10.00),
//!     "USD",
//!     "Payment for Product/Service",
//! )).await?;
//!
//! // Redirect user to: payment.approval_url()
//! ```

mod config;
mod error;
mod mock;
mod payment;
mod paypal;
mod provider;

pub use config::{Mode, PayPalConfig};
pub use error::{PaymentError, Result};
pub use mock::{MockPaymentProvider, ProviderCall};
pub use payment::{
    Amount, ExecuteRequest, Intent, Link, Payer, Payment, PaymentMethod, PaymentSpec,
    PaymentState, RedirectUrls, Transaction, APPROVAL_REL,
};
pub use paypal::PayPalClient;
pub use provider::PaymentProvider;
