//! PayPal REST Client
//!
//! Implementation of `PaymentProvider` against the PayPal v1 payments API.
//! Only the calls the checkout flow needs are covered: OAuth token,
//! create, find and execute.

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::config::PayPalConfig;
use crate::error::{PaymentError, Result};
use crate::payment::{ExecuteRequest, Payment, PaymentSpec};
use crate::provider::PaymentProvider;

const TOKEN_PATH: &str = "/v1/oauth2/token";
const PAYMENTS_PATH: &str = "/v1/payments/payment";

/// Refresh the token this long before PayPal says it expires
const TOKEN_EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// Error body shared by the REST API (`name`/`message`) and OAuth (`error`/`error_description`)
#[derive(Default, Deserialize)]
struct ErrorBody {
    #[serde(default, alias = "error")]
    name: String,
    #[serde(default, alias = "error_description")]
    message: String,
}

struct AccessToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    fn is_fresh(&self) -> bool {
        Utc::now() < self.expires_at
    }
}

/// PayPal client
pub struct PayPalClient {
    http: reqwest::Client,
    config: PayPalConfig,
    token: Mutex<Option<AccessToken>>,
}

impl PayPalClient {
    /// Create a new client from configuration
    pub fn new(config: PayPalConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            token: Mutex::new(None),
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(PayPalConfig::from_env()?))
    }

    /// Get a bearer token, reusing the cached one while it is fresh
    async fn access_token(&self) -> Result<String> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh()) {
            return Ok(token.value.clone());
        }

        let response = self
            .http
            .post(self.config.endpoint(TOKEN_PATH))
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let token = match Self::parse::<TokenResponse>(response).await {
            Err(PaymentError::Api { status, message, .. })
                if status == StatusCode::UNAUTHORIZED.as_u16() =>
            {
                return Err(PaymentError::Auth(message));
            }
            other => other?,
        };

        let lifetime = token.expires_in.saturating_sub(TOKEN_EXPIRY_MARGIN_SECS).max(0);
        let expires_at = TimeDelta::try_seconds(lifetime)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime));

        let Some(expires_at) = expires_at else {
            tracing::warn!(expires_in = token.expires_in, "Token lifetime out of range, not caching");
            *cached = None;
            return Ok(token.access_token);
        };
        tracing::debug!(mode = %self.config.mode, %expires_at, "Obtained PayPal access token");

        let value = token.access_token.clone();
        *cached = Some(AccessToken {
            value: token.access_token,
            expires_at,
        });
        Ok(value)
    }

    /// Decode a success body, or turn an error status into `PaymentError::Api`
    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let body = response.json::<ErrorBody>().await.unwrap_or_default();
        Err(PaymentError::api(status.as_u16(), body.name, body.message))
    }

    fn payment_url(&self, payment_id: &str) -> String {
        self.config.endpoint(&format!("{PAYMENTS_PATH}/{payment_id}"))
    }
}

#[async_trait]
impl PaymentProvider for PayPalClient {
    async fn create(&self, spec: &PaymentSpec) -> Result<Payment> {
        let token = self.access_token().await?;
        let response = self
            .http
            .post(self.config.endpoint(PAYMENTS_PATH))
            .bearer_auth(token)
            .json(spec)
            .send()
            .await?;

        let payment: Payment = Self::parse(response).await?;
        tracing::debug!(state = ?payment.state, links = payment.links.len(), "PayPal payment created");
        Ok(payment)
    }

    async fn find(&self, payment_id: &str) -> Result<Payment> {
        let token = self.access_token().await?;
        let response = self
            .http
            .get(self.payment_url(payment_id))
            .bearer_auth(token)
            .send()
            .await?;

        Self::parse(response).await
    }

    async fn execute(&self, payment_id: &str, payer_id: Option<&str>) -> Result<Payment> {
        let token = self.access_token().await?;
        let body = ExecuteRequest {
            payer_id: payer_id.map(str::to_string),
        };
        let response = self
            .http
            .post(format!("{}/execute", self.payment_url(payment_id)))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        let payment: Payment = Self::parse(response).await?;
        tracing::debug!(state = ?payment.state, "PayPal payment executed");
        Ok(payment)
    }

    fn name(&self) -> &str {
        "PayPal"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mode;
    use crate::payment::{PaymentState, RedirectUrls};
    use httpmock::prelude::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn client(server: &MockServer) -> PayPalClient {
        let config = PayPalConfig::new(Mode::Sandbox, "id", "secret").with_api_base(server.base_url());
        PayPalClient::new(config)
    }

    fn spec() -> PaymentSpec {
        PaymentSpec::sale(
            RedirectUrls {
                return_url: "http://example.com/execute-payment".into(),
                cancel_url: "http://example.com/payment-failed".into(),
            },
            dec!(10.00),
            "USD",
            "Payment for Product/Service",
        )
    }

    async fn mock_token(server: &MockServer) -> httpmock::Mock<'_> {
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(TOKEN_PATH)
                    .header("authorization", "Basic aWQ6c2VjcmV0")
                    .body_contains("grant_type=client_credentials");
                then.status(200).json_body(json!({
                    "scope": "https://uri.paypal.com/services/payments",
                    "access_token": "A21TOKEN",
                    "token_type": "Bearer",
                    "expires_in": 32400
                }));
            })
            .await
    }

    #[tokio::test]
    async fn test_create_payment() {
        let server = MockServer::start_async().await;
        let token = mock_token(&server).await;
        let create = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(PAYMENTS_PATH)
                    .header("authorization", "Bearer A21TOKEN")
                    .json_body(serde_json::to_value(spec()).unwrap());
                then.status(201).json_body(json!({
                    "id": "PAY-1",
                    "intent": "sale",
                    "state": "created",
                    "links": [
                        { "href": "https://api/self", "rel": "self", "method": "GET" },
                        { "href": "https://paypal/approve?token=EC-1", "rel": "approval_url", "method": "REDIRECT" },
                        { "href": "https://api/execute", "rel": "execute", "method": "POST" }
                    ]
                }));
            })
            .await;

        let payment = client(&server).create(&spec()).await.unwrap();

        token.assert_async().await;
        create.assert_async().await;
        assert_eq!(payment.id, "PAY-1");
        assert_eq!(payment.state, PaymentState::Created);
        assert_eq!(payment.approval_url(), Some("https://paypal/approve?token=EC-1"));
    }

    #[tokio::test]
    async fn test_token_is_cached() {
        let server = MockServer::start_async().await;
        let token = mock_token(&server).await;
        let find = server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/payments/payment/PAY-1");
                then.status(200)
                    .json_body(json!({ "id": "PAY-1", "state": "approved" }));
            })
            .await;

        let client = client(&server);
        client.find("PAY-1").await.unwrap();
        client.find("PAY-1").await.unwrap();

        token.assert_hits_async(1).await;
        find.assert_hits_async(2).await;
    }

    #[tokio::test]
    async fn test_out_of_range_token_lifetime_is_not_cached() {
        let server = MockServer::start_async().await;
        let token = server
            .mock_async(|when, then| {
                when.method(POST).path(TOKEN_PATH);
                then.status(200).json_body(json!({
                    "access_token": "A21TOKEN",
                    "token_type": "Bearer",
                    "expires_in": 9_000_000_000_000_i64
                }));
            })
            .await;
        let find = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v1/payments/payment/PAY-1")
                    .header("authorization", "Bearer A21TOKEN");
                then.status(200)
                    .json_body(json!({ "id": "PAY-1", "state": "approved" }));
            })
            .await;

        let client = client(&server);
        client.find("PAY-1").await.unwrap();
        client.find("PAY-1").await.unwrap();

        token.assert_hits_async(2).await;
        find.assert_hits_async(2).await;
    }

    #[tokio::test]
    async fn test_execute_sends_payer_id() {
        let server = MockServer::start_async().await;
        mock_token(&server).await;
        let execute = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/payments/payment/PAY-1/execute")
                    .json_body(json!({ "payer_id": "PAYER-1" }));
                then.status(200)
                    .json_body(json!({ "id": "PAY-1", "state": "approved" }));
            })
            .await;

        let payment = client(&server).execute("PAY-1", Some("PAYER-1")).await.unwrap();

        execute.assert_async().await;
        assert_eq!(payment.state, PaymentState::Approved);
    }

    #[tokio::test]
    async fn test_execute_without_payer_sends_null() {
        let server = MockServer::start_async().await;
        mock_token(&server).await;
        let execute = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/payments/payment/PAY-1/execute")
                    .json_body(json!({ "payer_id": null }));
                then.status(400).json_body(json!({
                    "name": "VALIDATION_ERROR",
                    "message": "Invalid request - see details",
                    "debug_id": "abc123"
                }));
            })
            .await;

        let result = client(&server).execute("PAY-1", None).await;

        execute.assert_async().await;
        match result {
            Err(PaymentError::Api { status, name, .. }) => {
                assert_eq!(status, 400);
                assert_eq!(name, "VALIDATION_ERROR");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_find_missing_payment() {
        let server = MockServer::start_async().await;
        mock_token(&server).await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/payments/payment/PAY-404");
                then.status(404).json_body(json!({
                    "name": "INVALID_RESOURCE_ID",
                    "message": "Requested resource ID was not found."
                }));
            })
            .await;

        let result = client(&server).find("PAY-404").await;
        assert!(matches!(result, Err(PaymentError::Api { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_rejected_credentials() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(TOKEN_PATH);
                then.status(401).json_body(json!({
                    "error": "invalid_client",
                    "error_description": "Client Authentication failed"
                }));
            })
            .await;

        let result = client(&server).create(&spec()).await;
        match result {
            Err(PaymentError::Auth(message)) => assert_eq!(message, "Client Authentication failed"),
            other => panic!("expected auth error, got {other:?}"),
        }
    }
}
