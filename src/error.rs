// SPDX-License-Identifier: MIT

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Duplicate record: {0}")]
    Conflict(String),

    #[error("User has already paid")]
    AlreadyPaid,

    #[error("Payment verification failed")]
    VerificationFailed,

    #[error("Razorpay API error: {0}")]
    PaymentProvider(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", Some(msg.clone())),
            AppError::AlreadyPaid => (
                StatusCode::BAD_REQUEST,
                "already_paid",
                Some("User has already paid".to_string()),
            ),
            AppError::VerificationFailed => (
                StatusCode::BAD_REQUEST,
                "verification_failed",
                Some("Payment verification failed".to_string()),
            ),
            AppError::PaymentProvider(msg) => {
                // Provider errors may embed request details; log them
                // but keep the response body generic.
                tracing::error!(error = %msg, "Razorpay API error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "payment_provider_error",
                    None,
                )
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
