// SPDX-License-Identifier: MIT

//! Access guard: the single rule deciding whether an identity may
//! reach the editor.
//!
//! The frontend evaluates this at three places (direct navigation,
//! post-auth redirect, post-checkout redirect); keeping the rule in
//! one function means those call sites cannot drift apart.

use serde::Serialize;

use crate::models::User;

/// Outcome of the access check, with the remediation step when access
/// is denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDecision {
    /// No identity presented: authenticate first.
    SignIn,
    /// Authenticated but not entitled: complete checkout.
    Checkout,
    /// Authenticated and paid.
    Granted,
}

/// Evaluate the access rule for an optional identity and its user
/// record (if one exists yet).
///
/// An authenticated identity without a stored record is treated the
/// same as an unpaid one: the remediation is checkout, and the record
/// gets created on the way there.
pub fn evaluate(identity: Option<&str>, user: Option<&User>) -> AccessDecision {
    match identity {
        None => AccessDecision::SignIn,
        Some(_) => match user {
            Some(user) if user.has_paid => AccessDecision::Granted,
            _ => AccessDecision::Checkout,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(has_paid: bool) -> User {
        User {
            id: 1,
            email: "a@x.com".to_string(),
            username: None,
            supabase_id: "sb_1".to_string(),
            has_paid,
            razorpay_payment_id: None,
            razorpay_order_id: None,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_no_identity_requires_sign_in() {
        assert_eq!(evaluate(None, None), AccessDecision::SignIn);
        // A record without an identity still means sign-in
        assert_eq!(evaluate(None, Some(&user(true))), AccessDecision::SignIn);
    }

    #[test]
    fn test_unpaid_identity_requires_checkout() {
        assert_eq!(
            evaluate(Some("sb_1"), Some(&user(false))),
            AccessDecision::Checkout
        );
        assert_eq!(evaluate(Some("sb_1"), None), AccessDecision::Checkout);
    }

    #[test]
    fn test_paid_identity_granted() {
        assert_eq!(
            evaluate(Some("sb_1"), Some(&user(true))),
            AccessDecision::Granted
        );
    }
}
