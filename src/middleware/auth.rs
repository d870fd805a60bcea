// SPDX-License-Identifier: MIT

//! Identity extraction middleware.
//!
//! The frontend forwards the Supabase-issued user id in the
//! `X-User-Id` header after sign-in. This service never mints its own
//! sessions; it only requires that an identity was presented.

use axum::{
    extract::Request,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

/// Header carrying the externally-issued identity.
pub const IDENTITY_HEADER: &str = "X-User-Id";

/// Authenticated identity extracted from the request headers.
#[derive(Debug, Clone)]
pub struct Identity {
    pub supabase_id: String,
}

/// Read the identity header, if present and non-empty.
pub fn extract_identity(headers: &HeaderMap) -> Option<String> {
    headers
        .get(IDENTITY_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Middleware that requires an identity header.
pub async fn require_identity(mut request: Request, next: Next) -> Result<Response, StatusCode> {
    let Some(supabase_id) = extract_identity(request.headers()) else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    request.extensions_mut().insert(Identity { supabase_id });

    Ok(next.run(request).await)
}
