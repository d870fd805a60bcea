// SPDX-License-Identifier: MIT

//! User routes: sign-in upsert and profile lookup.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::auth::Identity;
use crate::models::{NewUser, User};
use crate::AppState;

/// Routes that require no identity header.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/user", post(create_user))
}

/// Routes behind the identity middleware (applied in routes/mod.rs).
pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/user", get(get_user))
}

/// Payload for creating a user after the first Supabase sign-in.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    pub username: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub supabase_id: String,
}

/// Get the current user's record.
async fn get_user(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<User>> {
    let user = state
        .store
        .get_by_supabase_id(&identity.supabase_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}

/// Create the user record for a freshly signed-in identity, or return
/// the existing one (find-or-create).
///
/// Two concurrent sign-ins can both miss the lookup; the store rejects
/// the second insert with a conflict and we re-fetch the winner, so
/// exactly one record exists per Supabase id.
async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Json<User>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    if let Some(existing) = state.store.get_by_supabase_id(&payload.supabase_id).await? {
        return Ok(Json(existing));
    }

    let new_user = NewUser {
        email: payload.email,
        username: payload.username,
        supabase_id: payload.supabase_id.clone(),
    };

    match state.store.create(new_user).await {
        Ok(user) => {
            tracing::info!(user_id = user.id, "User created");
            Ok(Json(user))
        }
        Err(AppError::Conflict(msg)) => {
            // Lost a create race, or the email is taken by another
            // identity. The former resolves by re-fetching.
            match state.store.get_by_supabase_id(&payload.supabase_id).await? {
                Some(user) => Ok(Json(user)),
                None => Err(AppError::Conflict(msg)),
            }
        }
        Err(e) => Err(e),
    }
}
