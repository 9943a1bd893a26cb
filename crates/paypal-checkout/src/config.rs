//! PayPal Provider Configuration
//!
//! Built once at process start and handed to the client. Read-only after that.

use std::fmt;
use std::str::FromStr;

use crate::error::{PaymentError, Result};

const SANDBOX_API_BASE: &str = "https://api-m.sandbox.paypal.com";
const LIVE_API_BASE: &str = "https://api-m.paypal.com";

/// PayPal operating mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Sandbox,
    Live,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Sandbox => "sandbox",
            Mode::Live => "live",
        }
    }

    /// REST API base URL for this mode
    pub fn api_base(&self) -> &'static str {
        match self {
            Mode::Sandbox => SANDBOX_API_BASE,
            Mode::Live => LIVE_API_BASE,
        }
    }
}

impl FromStr for Mode {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "sandbox" => Ok(Mode::Sandbox),
            "live" => Ok(Mode::Live),
            other => Err(PaymentError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Credentials and endpoint for the PayPal REST API
#[derive(Clone)]
pub struct PayPalConfig {
    /// Sandbox or live
    pub mode: Mode,

    /// OAuth client id
    pub client_id: String,

    /// OAuth client secret
    pub client_secret: String,

    /// API base URL, defaults to the mode's endpoint
    pub api_base: String,
}

impl PayPalConfig {
    pub fn new(mode: Mode, client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            mode,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            api_base: mode.api_base().to_string(),
        }
    }

    /// Point the client at another API host (used against local mock servers)
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Create from environment variables
    ///
    /// `PAYPAL_MODE` (default `sandbox`), `PAYPAL_CLIENT_ID`,
    /// `PAYPAL_CLIENT_SECRET`, and optionally `PAYPAL_API_BASE`.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mode = match lookup("PAYPAL_MODE") {
            Some(raw) => raw.parse()?,
            None => Mode::default(),
        };
        let client_id = lookup("PAYPAL_CLIENT_ID")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| PaymentError::Config("PAYPAL_CLIENT_ID not set".into()))?;
        let client_secret = lookup("PAYPAL_CLIENT_SECRET")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| PaymentError::Config("PAYPAL_CLIENT_SECRET not set".into()))?;

        let config = Self::new(mode, client_id, client_secret);
        Ok(match lookup("PAYPAL_API_BASE") {
            Some(base) if !base.is_empty() => config.with_api_base(base),
            _ => config,
        })
    }

    /// Absolute URL for an API path
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), path)
    }
}

impl fmt::Debug for PayPalConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PayPalConfig")
            .field("mode", &self.mode)
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("api_base", &self.api_base)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("sandbox".parse::<Mode>().unwrap(), Mode::Sandbox);
        assert_eq!(" LIVE ".parse::<Mode>().unwrap(), Mode::Live);
        assert!(matches!(
            "production".parse::<Mode>(),
            Err(PaymentError::InvalidMode(_))
        ));
    }

    #[test]
    fn test_defaults_to_sandbox() {
        let config = PayPalConfig::from_vars(vars(&[
            ("PAYPAL_CLIENT_ID", "id"),
            ("PAYPAL_CLIENT_SECRET", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.mode, Mode::Sandbox);
        assert_eq!(config.api_base, SANDBOX_API_BASE);
    }

    #[test]
    fn test_live_mode_and_override() {
        let config = PayPalConfig::from_vars(vars(&[
            ("PAYPAL_MODE", "live"),
            ("PAYPAL_CLIENT_ID", "id"),
            ("PAYPAL_CLIENT_SECRET", "secret"),
        ]))
        .unwrap();
        assert_eq!(config.api_base, LIVE_API_BASE);

        let config = config.with_api_base("http://127.0.0.1:9000/");
        assert_eq!(
            config.endpoint("/v1/oauth2/token"),
            "http://127.0.0.1:9000/v1/oauth2/token"
        );
    }

    #[test]
    fn test_missing_credentials() {
        let result = PayPalConfig::from_vars(vars(&[("PAYPAL_CLIENT_ID", "id")]));
        assert!(matches!(result, Err(PaymentError::Config(_))));

        let result = PayPalConfig::from_vars(vars(&[
            ("PAYPAL_CLIENT_ID", ""),
            ("PAYPAL_CLIENT_SECRET", "secret"),
        ]));
        assert!(matches!(result, Err(PaymentError::Config(_))));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = PayPalConfig::new(Mode::Sandbox, "id", "top-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("top-secret"));
        assert!(debug.contains("***"));
    }
}
