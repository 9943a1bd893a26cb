//! Page Templates
//!
//! Static HTML embedded at compile time. No request data reaches the output.

use axum::response::Html;

const CHECKOUT: &str = include_str!("../templates/checkout.html");
const PAYMENT_SUCCESS: &str = include_str!("../templates/payment_success.html");
const PAYMENT_FAILED: &str = include_str!("../templates/payment_failed.html");

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Checkout,
    PaymentSuccess,
    PaymentFailed,
}

impl Page {
    pub fn template_name(&self) -> &'static str {
        match self {
            Page::Checkout => "checkout.html",
            Page::PaymentSuccess => "payment_success.html",
            Page::PaymentFailed => "payment_failed.html",
        }
    }

    fn source(&self) -> &'static str {
        match self {
            Page::Checkout => CHECKOUT,
            Page::PaymentSuccess => PAYMENT_SUCCESS,
            Page::PaymentFailed => PAYMENT_FAILED,
        }
    }

    pub fn render(self) -> Html<&'static str> {
        tracing::debug!(template = self.template_name(), "Rendering page");
        Html(self.source())
    }
}
