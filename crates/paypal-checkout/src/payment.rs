//! Payment Types
//!
//! Request and response shapes of the PayPal v1 payments resource.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Link relation PayPal uses for the buyer approval redirect
pub const APPROVAL_REL: &str = "approval_url";

/// Payment intent
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    #[default]
    Sale,
    Authorize,
    Order,
}

/// Funding instrument chosen by the payer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Paypal,
    CreditCard,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payer {
    pub payment_method: PaymentMethod,
}

/// Where PayPal sends the buyer after approving or cancelling
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectUrls {
    pub return_url: String,
    pub cancel_url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    /// Serialized as a string, e.g. `"10.00"`
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
    pub currency: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub amount: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Payment creation request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSpec {
    pub intent: Intent,
    pub payer: Payer,
    pub redirect_urls: RedirectUrls,
    pub transactions: Vec<Transaction>,
}

impl PaymentSpec {
    /// A PayPal-funded sale of a single amount
    pub fn sale(
        redirect_urls: RedirectUrls,
        total: Decimal,
        currency: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            intent: Intent::Sale,
            payer: Payer::default(),
            redirect_urls,
            transactions: vec![Transaction {
                amount: Amount {
                    total,
                    currency: currency.into(),
                },
                description: Some(description.into()),
            }],
        }
    }
}

/// Lifecycle state reported by PayPal
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentState {
    Created,
    Approved,
    Failed,
    Canceled,
    Expired,
    Pending,
    #[serde(other)]
    Unknown,
}

/// HATEOAS link attached to a payment
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    pub rel: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

impl Link {
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            rel: rel.into(),
            method: None,
        }
    }
}

/// Payment resource as returned by create, find and execute
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,

    pub state: PaymentState,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,

    #[serde(default)]
    pub links: Vec<Link>,
}

impl Payment {
    /// Find a link by its relation
    pub fn link(&self, rel: &str) -> Option<&Link> {
        self.links.iter().find(|link| link.rel.eq_ignore_ascii_case(rel))
    }

    /// URL the buyer must visit to approve the payment
    pub fn approval_url(&self) -> Option<&str> {
        self.link(APPROVAL_REL).map(|link| link.href.as_str())
    }
}

/// Body of the execute call
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteRequest {
    /// Sent as `null` when the payer id is missing
    pub payer_id: Option<String>,
}
