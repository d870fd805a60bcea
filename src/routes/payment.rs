// SPDX-License-Identifier: MIT

//! Payment routes: order creation, receipt verification, status.
//!
//! Entitlement is only ever granted here, after the receipt signature
//! is independently recomputed; a client-asserted "I paid" is never
//! trusted.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::config::{UNLOCK_AMOUNT, UNLOCK_CURRENCY};
use crate::error::{AppError, Result};
use crate::middleware::auth::Identity;
use crate::models::User;
use crate::AppState;

/// Payment routes (identity middleware applied in routes/mod.rs).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/create-payment-order", post(create_payment_order))
        .route("/api/verify-payment", post(verify_payment))
        .route("/api/payment-status", get(payment_status))
}

/// Response for order creation: everything the hosted checkout needs,
/// and nothing secret.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub order_id: String,
    pub amount: u64,
    pub currency: String,
    pub key_id: String,
}

/// Create a Razorpay order for the one-time unlock.
///
/// Refuses to create an order for an already-entitled user so a paid
/// user can never be charged twice.
async fn create_payment_order(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<CreateOrderResponse>> {
    let user = state
        .store
        .get_by_supabase_id(&identity.supabase_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if user.has_paid {
        return Err(AppError::AlreadyPaid);
    }

    // Tag the order with our ids so the payment can be reconciled
    // against the user later.
    let receipt = format!("receipt_{}_{}", user.id, chrono::Utc::now().timestamp_millis());
    let notes = serde_json::json!({
        "userId": user.id.to_string(),
        "supabaseId": user.supabase_id,
    });

    let order = state
        .razorpay
        .create_order(UNLOCK_AMOUNT, UNLOCK_CURRENCY, &receipt, notes)
        .await?;

    tracing::info!(
        user_id = user.id,
        order_id = %order.id,
        amount = order.amount,
        "Payment order created"
    );

    Ok(Json(CreateOrderResponse {
        order_id: order.id,
        amount: order.amount,
        currency: order.currency,
        key_id: state.razorpay.key_id().to_string(),
    }))
}

/// Receipt handed back by the hosted checkout.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentRequest {
    pub payment_id: String,
    pub order_id: String,
    pub signature: String,
}

#[derive(Serialize)]
pub struct VerifyPaymentResponse {
    pub success: bool,
    pub user: User,
}

/// Verify a payment receipt and flip the entitlement flag.
///
/// A signature mismatch behaves exactly like "payment never happened":
/// same error, no state change. Re-submitting a valid receipt is
/// idempotent; it writes the same terminal values again.
async fn verify_payment(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<VerifyPaymentRequest>,
) -> Result<Json<VerifyPaymentResponse>> {
    let user = state
        .store
        .get_by_supabase_id(&identity.supabase_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if !state
        .razorpay
        .verify_signature(&payload.order_id, &payload.payment_id, &payload.signature)
    {
        tracing::warn!(
            user_id = user.id,
            order_id = %payload.order_id,
            "Payment signature mismatch"
        );
        return Err(AppError::VerificationFailed);
    }

    let updated = state
        .store
        .update_payment_status(
            user.id,
            true,
            Some(payload.payment_id),
            Some(payload.order_id),
        )
        .await?;

    tracing::info!(user_id = updated.id, "Payment verified, entitlement granted");

    Ok(Json(VerifyPaymentResponse {
        success: true,
        user: updated,
    }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatusResponse {
    pub has_paid: bool,
}

/// Check whether the current user has paid.
async fn payment_status(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<PaymentStatusResponse>> {
    let user = state
        .store
        .get_by_supabase_id(&identity.supabase_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(PaymentStatusResponse {
        has_paid: user.has_paid,
    }))
}
