//! Payment Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Payment-related errors
#[derive(Error, Debug)]
pub enum PaymentError {
    /// Transport-level failure talking to PayPal
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// PayPal answered with a non-success status
    #[error("PayPal API error ({status}) {name}: {message}")]
    Api {
        status: u16,
        name: String,
        message: String,
    },

    /// OAuth credentials rejected
    #[error("PayPal authentication failed: {0}")]
    Auth(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unknown operating mode
    #[error("Invalid PayPal mode '{0}' (expected 'sandbox' or 'live')")]
    InvalidMode(String),

    /// Test double configured to fail
    #[error("Simulated provider failure: {0}")]
    Simulated(String),
}

impl PaymentError {
    /// Build an API error from a status code and a parsed error body
    pub fn api(status: u16, name: impl Into<String>, message: impl Into<String>) -> Self {
        PaymentError::Api {
            status,
            name: name.into(),
            message: message.into(),
        }
    }
}
