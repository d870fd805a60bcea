// SPDX-License-Identifier: MIT

//! Access check route.
//!
//! Public on purpose: an anonymous visitor gets a `sign_in` decision
//! instead of a 401, so the frontend's redirect logic is one lookup.

use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::access::{self, AccessDecision};
use crate::error::Result;
use crate::middleware::auth::extract_identity;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/access", get(check_access))
}

#[derive(Serialize)]
pub struct AccessResponse {
    pub decision: AccessDecision,
}

/// Evaluate the access rule for the caller.
async fn check_access(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<AccessResponse>> {
    let identity = extract_identity(&headers);

    let user = match &identity {
        Some(supabase_id) => state.store.get_by_supabase_id(supabase_id).await?,
        None => None,
    };

    let decision = access::evaluate(identity.as_deref(), user.as_ref());

    Ok(Json(AccessResponse { decision }))
}
