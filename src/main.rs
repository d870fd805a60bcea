// SPDX-License-Identifier: MIT

//! Backdrop Gateway API Server
//!
//! Gates access to the externally hosted Backdrop image editor behind a
//! one-time Razorpay payment, with Supabase-issued identities.

use std::sync::Arc;

use backdrop_gateway::{
    config::Config,
    services::RazorpayClient,
    store::{MemoryStore, SharedStore},
    AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Backdrop Gateway API");

    // Entitlement store. In-memory for now; the store trait is the seam
    // for a durable backend, and restart wipes entitlements until one
    // is plugged in.
    let store: SharedStore = Arc::new(MemoryStore::new());
    tracing::warn!("Using in-memory entitlement store; records do not survive restart");

    // Razorpay client for order creation and receipt verification
    let razorpay = RazorpayClient::new(
        config.razorpay_key_id.clone(),
        config.razorpay_key_secret.clone(),
    );
    tracing::info!(key_id = %config.razorpay_key_id, "Razorpay client initialized");

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        store,
        razorpay,
    });

    // Build router
    let app = backdrop_gateway::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("backdrop_gateway=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
