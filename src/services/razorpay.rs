// SPDX-License-Identifier: MIT

//! Razorpay API client.
//!
//! Handles:
//! - Order creation for the hosted checkout
//! - Payment receipt verification (HMAC-SHA256 over `order_id|payment_id`)
//!
//! Order creation retries transient failures with backoff; it has no
//! local side effects, so a retried request cannot double-charge.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Attempts for one order-creation call (1 initial + 2 retries).
const ORDER_CREATE_ATTEMPTS: u32 = 3;
/// Base delay for exponential backoff between attempts.
const BACKOFF_BASE_MS: u64 = 200;
/// Per-request timeout; a hung provider call surfaces as an error
/// rather than stalling the request forever.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// An order created with the payment provider.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderOrder {
    pub id: String,
    pub amount: u64,
    pub currency: String,
}

/// Razorpay API client.
#[derive(Clone)]
pub struct RazorpayClient {
    /// `None` in mock mode (offline tests): orders are fabricated
    /// locally and no network call is made.
    http: Option<reqwest::Client>,
    base_url: String,
    key_id: String,
    key_secret: String,
    mock_order_seq: Arc<AtomicU64>,
}

impl RazorpayClient {
    /// Create a new Razorpay client with API credentials.
    pub fn new(key_id: String, key_secret: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build Razorpay HTTP client");

        Self {
            http: Some(http),
            base_url: "https://api.razorpay.com/v1".to_string(),
            key_id,
            key_secret,
            mock_order_seq: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Create a mock client for testing (offline mode).
    ///
    /// `create_order` returns locally fabricated orders; signature
    /// verification works normally against `key_secret`.
    pub fn new_mock(key_id: String, key_secret: String) -> Self {
        Self {
            http: None,
            base_url: "http://mock.invalid".to_string(),
            key_id,
            key_secret,
            mock_order_seq: Arc::new(AtomicU64::new(0)),
        }
    }

    /// The public key id, safe to hand to the hosted checkout.
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Create a payment order.
    ///
    /// Transient failures (network errors, 5xx) are retried with
    /// exponential backoff; 4xx responses fail immediately.
    pub async fn create_order(
        &self,
        amount: u64,
        currency: &str,
        receipt: &str,
        notes: serde_json::Value,
    ) -> Result<ProviderOrder, AppError> {
        let Some(http) = &self.http else {
            let seq = self.mock_order_seq.fetch_add(1, Ordering::Relaxed);
            return Ok(ProviderOrder {
                id: format!("order_mock_{}", seq),
                amount,
                currency: currency.to_string(),
            });
        };

        let url = format!("{}/orders", self.base_url);
        let body = serde_json::json!({
            "amount": amount,
            "currency": currency,
            "receipt": receipt,
            "notes": notes,
        });

        let mut last_error = String::new();
        for attempt in 0..ORDER_CREATE_ATTEMPTS {
            if attempt > 0 {
                let delay = BACKOFF_BASE_MS * (1u64 << (attempt - 1));
                tracing::debug!(attempt, delay_ms = delay, "Retrying order creation");
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }

            let response = http
                .post(&url)
                .basic_auth(&self.key_id, Some(&self.key_secret))
                .json(&body)
                .send()
                .await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    return resp.json::<ProviderOrder>().await.map_err(|e| {
                        AppError::PaymentProvider(format!("Invalid order response: {}", e))
                    });
                }
                Ok(resp) if resp.status().is_client_error() => {
                    // Our request is malformed or the credentials are
                    // wrong; retrying will not help.
                    let status = resp.status();
                    let text = resp.text().await.unwrap_or_default();
                    return Err(AppError::PaymentProvider(format!(
                        "Order creation rejected ({}): {}",
                        status, text
                    )));
                }
                Ok(resp) => {
                    last_error = format!("HTTP {}", resp.status());
                }
                Err(e) => {
                    last_error = e.to_string();
                }
            }
        }

        Err(AppError::PaymentProvider(format!(
            "Order creation failed after {} attempts: {}",
            ORDER_CREATE_ATTEMPTS, last_error
        )))
    }

    /// Verify a payment receipt signature.
    ///
    /// Recomputes HMAC-SHA256 over `"{order_id}|{payment_id}"` keyed by
    /// the API secret and compares it to the hex signature Razorpay
    /// handed to the client. Comparison is constant-time; a malformed
    /// signature is just a non-matching one.
    pub fn verify_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        let Ok(mut mac) = HmacSha256::new_from_slice(self.key_secret.as_bytes()) else {
            return false;
        };
        mac.update(format!("{}|{}", order_id, payment_id).as_bytes());
        let expected = mac.finalize().into_bytes();

        let Ok(provided) = hex::decode(signature) else {
            return false;
        };
        if provided.len() != expected.len() {
            return false;
        }

        expected.as_slice().ct_eq(provided.as_slice()).into()
    }
}
