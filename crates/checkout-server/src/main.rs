//! PayPal checkout HTTP server
//!
//! Axum-based server rendering the checkout pages and driving PayPal's
//! hosted create/approve/execute flow.

mod checkout;
mod handlers;
mod pages;
mod router;
mod state;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use paypal_checkout::{PayPalClient, PayPalConfig};

use crate::router::{router, CHECKOUT, CREATE_PAYMENT, EXECUTE_PAYMENT, HEALTH, PAYMENT_FAILED};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Provider configuration is read once here and never again
    let config = PayPalConfig::from_env().inspect_err(|_| {
        tracing::error!("PayPal not configured");
        tracing::error!("  Set PAYPAL_CLIENT_ID and PAYPAL_CLIENT_SECRET in .env");
    })?;
    tracing::info!(mode = %config.mode, api = %config.api_base, "✓ PayPal configured");

    let state = AppState::new(Arc::new(PayPalClient::new(config)));
    let app = router(state);

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 checkout server running on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET      {:<18} - Health check", HEALTH);
    tracing::info!("  GET      {:<18} - Checkout page", CHECKOUT);
    tracing::info!("  GET/POST {:<18} - Create PayPal payment", CREATE_PAYMENT);
    tracing::info!("  GET      {:<18} - PayPal return URL", EXECUTE_PAYMENT);
    tracing::info!("  GET      {:<18} - Failure / cancel page", PAYMENT_FAILED);
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
