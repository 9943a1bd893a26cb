//! Routes

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::handlers::{
    checkout_page, create_payment, execute_payment, health_check, payment_failed,
};
use crate::state::AppState;

pub const CHECKOUT: &str = "/checkout";
pub const CREATE_PAYMENT: &str = "/create-payment";
pub const EXECUTE_PAYMENT: &str = "/execute-payment";
pub const PAYMENT_FAILED: &str = "/payment-failed";
pub const HEALTH: &str = "/health";

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        // Health
        .route(HEALTH, get(health_check))
        // Pages
        .route("/", get(checkout_page))
        .route(CHECKOUT, get(checkout_page))
        .route(PAYMENT_FAILED, get(payment_failed))
        // Payment flow
        .route(CREATE_PAYMENT, get(create_payment).post(create_payment))
        .route(EXECUTE_PAYMENT, get(execute_payment))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
