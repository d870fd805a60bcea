// SPDX-License-Identifier: MIT

//! User model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's entitlement record.
///
/// Serialized in camelCase to match the frontend contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Internal id, assigned by the store on creation
    pub id: i64,
    /// Email address (unique)
    pub email: String,
    /// Optional display name
    pub username: Option<String>,
    /// Supabase user id (unique; the lookup key during a request)
    pub supabase_id: String,
    /// Entitlement flag; false until a payment is verified
    pub has_paid: bool,
    /// Razorpay payment id, recorded when verification succeeds
    pub razorpay_payment_id: Option<String>,
    /// Razorpay order id, recorded when verification succeeds
    pub razorpay_order_id: Option<String>,
    /// When the record was created
    pub created_at: DateTime<Utc>,
}

/// Fields supplied by the client when creating a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: Option<String>,
    pub supabase_id: String,
}
