// SPDX-License-Identifier: MIT

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use backdrop_gateway::config::Config;
use backdrop_gateway::routes::create_router;
use backdrop_gateway::services::RazorpayClient;
use backdrop_gateway::store::{MemoryStore, SharedStore};
use backdrop_gateway::AppState;
use hmac::{Hmac, Mac};
use sha2::Sha256;

/// Create a test app with an in-memory store and a mock Razorpay
/// client. Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let store: SharedStore = Arc::new(MemoryStore::new());
    let razorpay = RazorpayClient::new_mock(
        config.razorpay_key_id.clone(),
        config.razorpay_key_secret.clone(),
    );

    let state = Arc::new(AppState {
        config,
        store,
        razorpay,
    });

    (create_router(state.clone()), state)
}

/// Build a JSON request, optionally carrying the identity header.
#[allow(dead_code)]
pub fn json_request(
    method: &str,
    uri: &str,
    identity: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");

    if let Some(identity) = identity {
        builder = builder.header("X-User-Id", identity);
    }

    let body = match body {
        Some(value) => Body::from(value.to_string()),
        None => Body::empty(),
    };

    builder.body(body).unwrap()
}

/// Collect a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Compute the receipt signature Razorpay would hand the checkout for
/// this order/payment pair.
#[allow(dead_code)]
pub fn razorpay_signature(secret: &str, order_id: &str, payment_id: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(format!("{}|{}", order_id, payment_id).as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
