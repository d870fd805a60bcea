// SPDX-License-Identifier: MIT

//! Access guard truth table over the HTTP surface.

use axum::http::StatusCode;
use tower::ServiceExt;

mod common;

use common::{body_json, create_test_app, json_request, razorpay_signature};

#[tokio::test]
async fn test_anonymous_visitor_is_sent_to_sign_in() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(json_request("GET", "/api/access", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["decision"], "sign_in");
}

#[tokio::test]
async fn test_unpaid_identity_is_sent_to_checkout() {
    let (app, _) = create_test_app();

    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/user",
            None,
            Some(serde_json::json!({
                "email": "a@x.com",
                "supabaseId": "sb_1",
            })),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(json_request("GET", "/api/access", Some("sb_1"), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["decision"], "checkout");
}

#[tokio::test]
async fn test_identity_without_record_is_sent_to_checkout() {
    let (app, _) = create_test_app();

    // Signed in with Supabase but POST /api/user has not happened yet
    let response = app
        .oneshot(json_request("GET", "/api/access", Some("sb_new"), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["decision"], "checkout");
}

#[tokio::test]
async fn test_paid_identity_is_granted() {
    let (app, state) = create_test_app();
    let secret = state.config.razorpay_key_secret.clone();

    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/user",
            None,
            Some(serde_json::json!({
                "email": "a@x.com",
                "supabaseId": "sb_1",
            })),
        ))
        .await
        .unwrap();

    let signature = razorpay_signature(&secret, "order_1", "pay_1");
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/verify-payment",
            Some("sb_1"),
            Some(serde_json::json!({
                "paymentId": "pay_1",
                "orderId": "order_1",
                "signature": signature,
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(json_request("GET", "/api/access", Some("sb_1"), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["decision"], "granted");
}
