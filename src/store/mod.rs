// SPDX-License-Identifier: MIT

//! Entitlement store: the one stateful component.
//!
//! The store exclusively owns all user records; callers get clones,
//! never handles into the backing storage. The trait is the seam for a
//! durable backend (the in-memory store loses everything on restart).

pub mod memory;

pub use memory::MemoryStore;

use std::sync::Arc;

use crate::error::AppError;
use crate::models::{NewUser, User};

/// Abstract entitlement store.
///
/// Implementations must make `create` reject duplicate emails and
/// Supabase ids, and must apply `update_payment_status` atomically per
/// record with respect to concurrent updates to the same record.
#[async_trait::async_trait]
pub trait EntitlementStore: Send + Sync {
    /// Look up a user by internal id.
    async fn get_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Look up a user by email.
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Look up a user by Supabase id.
    async fn get_by_supabase_id(&self, supabase_id: &str) -> Result<Option<User>, AppError>;

    /// Create a user with a fresh id, `has_paid = false` and a
    /// `created_at` stamp. Fails with `Conflict` if the email or
    /// Supabase id is already taken.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Merge payment fields into an existing record. `None` fields are
    /// left unchanged. Fails with `NotFound` for an unknown id.
    async fn update_payment_status(
        &self,
        id: i64,
        has_paid: bool,
        payment_id: Option<String>,
        order_id: Option<String>,
    ) -> Result<User, AppError>;
}

/// Shared handle to the configured store backend.
pub type SharedStore = Arc<dyn EntitlementStore>;
