//! HTTP Handlers
//!
//! Every failure renders the failure page with a 200 status. Provider error
//! detail goes to the log only.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, HeaderMap, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::checkout::{request_origin, sale_request};
use crate::pages::Page;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub provider: String,
}

/// Query parameters PayPal appends to the return URL
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ExecuteQuery {
    pub payment_id: Option<String>,
    pub payer_id: Option<String>,
}

impl ExecuteQuery {
    /// Last value wins when a key repeats; empty values count as absent
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let value = Some(value).filter(|v| !v.is_empty());
            match key.as_str() {
                "paymentId" => query.payment_id = value,
                "PayerID" => query.payer_id = value,
                _ => {}
            }
        }
        query
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        provider: state.payments.name().to_string(),
    })
}

/// Static checkout page
pub async fn checkout_page() -> Html<&'static str> {
    Page::Checkout.render()
}

/// Static failure page (also PayPal's cancel target)
pub async fn payment_failed() -> Html<&'static str> {
    Page::PaymentFailed.render()
}

/// Create a payment and send the buyer to PayPal for approval
pub async fn create_payment(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    let Some(origin) = request_origin(&headers, &uri) else {
        tracing::warn!("Cannot build callback URLs: request has no host");
        return Page::PaymentFailed.render().into_response();
    };

    let payment = match state.payments.create(&sale_request(&origin)).await {
        Ok(payment) => payment,
        Err(e) => {
            tracing::warn!(provider = state.payments.name(), "Payment creation failed: {}", e);
            return Page::PaymentFailed.render().into_response();
        }
    };

    match payment.approval_url() {
        Some(url) => found(url),
        None => {
            tracing::warn!(
                provider = state.payments.name(),
                links = payment.links.len(),
                "Created payment has no approval link"
            );
            Page::PaymentFailed.render().into_response()
        }
    }
}

/// PayPal return URL: look up the payment and execute it
///
/// Not idempotent: a repeated callback executes again and the provider decides.
pub async fn execute_payment(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Html<&'static str> {
    let query = match query {
        Ok(Query(pairs)) => ExecuteQuery::from_pairs(pairs),
        Err(e) => {
            tracing::warn!("Unreadable execute callback query: {}", e);
            return Page::PaymentFailed.render();
        }
    };

    let Some(payment_id) = query.payment_id.as_deref() else {
        tracing::warn!("Execute callback without a payment id");
        return Page::PaymentFailed.render();
    };

    let payment = match state.payments.find(payment_id).await {
        Ok(payment) => payment,
        Err(e) => {
            tracing::warn!(provider = state.payments.name(), "Payment lookup failed: {}", e);
            return Page::PaymentFailed.render();
        }
    };

    match state
        .payments
        .execute(&payment.id, query.payer_id.as_deref())
        .await
    {
        Ok(executed) => {
            tracing::info!(state = ?executed.state, "Payment executed");
            Page::PaymentSuccess.render()
        }
        Err(e) => {
            tracing::warn!(provider = state.payments.name(), "Payment execution failed: {}", e);
            Page::PaymentFailed.render()
        }
    }
}

/// `302 Found` redirect
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
