// SPDX-License-Identifier: MIT

//! In-memory entitlement store.
//!
//! A single mutex guards the record map and both unique indexes, so
//! the email/supabase-id uniqueness checks and the insert happen under
//! one critical section. Two concurrent sign-ins racing to create the
//! same user cannot both win; the loser gets `Conflict` and re-fetches.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::AppError;
use crate::models::{NewUser, User};
use crate::store::EntitlementStore;

#[derive(Default)]
struct Inner {
    users: HashMap<i64, User>,
    /// email -> user id
    by_email: HashMap<String, i64>,
    /// supabase id -> user id
    by_supabase_id: HashMap<String, i64>,
    next_id: i64,
}

/// In-memory store backed by a mutex-guarded indexed map.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // Lock poisoning only happens if a holder panicked; the data
        // itself is still consistent (every write path updates the
        // indexes before releasing), so recover the guard.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait::async_trait]
impl EntitlementStore for MemoryStore {
    async fn get_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.lock().users.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let inner = self.lock();
        Ok(inner
            .by_email
            .get(email)
            .and_then(|id| inner.users.get(id))
            .cloned())
    }

    async fn get_by_supabase_id(&self, supabase_id: &str) -> Result<Option<User>, AppError> {
        let inner = self.lock();
        Ok(inner
            .by_supabase_id
            .get(supabase_id)
            .and_then(|id| inner.users.get(id))
            .cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut inner = self.lock();

        if inner.by_email.contains_key(&new_user.email) {
            return Err(AppError::Conflict(format!(
                "email {} already registered",
                new_user.email
            )));
        }
        if inner.by_supabase_id.contains_key(&new_user.supabase_id) {
            return Err(AppError::Conflict(format!(
                "supabase id {} already registered",
                new_user.supabase_id
            )));
        }

        inner.next_id += 1;
        let user = User {
            id: inner.next_id,
            email: new_user.email,
            username: new_user.username,
            supabase_id: new_user.supabase_id,
            has_paid: false,
            razorpay_payment_id: None,
            razorpay_order_id: None,
            created_at: chrono::Utc::now(),
        };

        inner.by_email.insert(user.email.clone(), user.id);
        inner.by_supabase_id.insert(user.supabase_id.clone(), user.id);
        inner.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn update_payment_status(
        &self,
        id: i64,
        has_paid: bool,
        payment_id: Option<String>,
        order_id: Option<String>,
    ) -> Result<User, AppError> {
        let mut inner = self.lock();

        let user = inner
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;

        user.has_paid = has_paid;
        if payment_id.is_some() {
            user.razorpay_payment_id = payment_id;
        }
        if order_id.is_some() {
            user.razorpay_order_id = order_id;
        }

        Ok(user.clone())
    }
}
