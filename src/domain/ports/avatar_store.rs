//! Driving port for the avatar store.
//!
//! The store is the single capability set `{create, get, update, delete}`
//! that inbound adapters depend on. Two implementations exist: the local
//! lifecycle service over an [`super::AvatarRepository`], and a remote
//! adapter delegating to an upstream avatar API. Configuration selects
//! between them; handlers never know which one they talk to.

use async_trait::async_trait;

use crate::domain::{AdUserId, AvatarRecord, AvatarSelection, Error};

/// Avatar store operations.
///
/// # Lifecycle
///
/// `absent → active (create) → active (update)* → inactive (delete)`, with
/// no transition back to active: a retired record keeps occupying its key
/// forever.
///
/// # Soft-delete policy
///
/// `get` does not filter on `is_active`, and `create` collides on any
/// existing record, retired or not. A deleted avatar therefore stays
/// readable and permanently blocks recreation for its user. This is an
/// explicit, tested policy.
#[async_trait]
pub trait AvatarStore: Send + Sync {
    /// Create the record for `user_id`, failing with
    /// [`crate::domain::ErrorCode::AlreadyExists`] when any record is
    /// present for the key.
    async fn create(
        &self,
        user_id: AdUserId,
        selection: AvatarSelection,
    ) -> Result<AvatarRecord, Error>;

    /// Pure lookup; `None` when no record was ever created.
    async fn get(&self, user_id: &AdUserId) -> Result<Option<AvatarRecord>, Error>;

    /// Replace the mutable fields of the existing record, failing with
    /// [`crate::domain::ErrorCode::NotFound`] when absent.
    async fn update(
        &self,
        user_id: &AdUserId,
        selection: AvatarSelection,
    ) -> Result<AvatarRecord, Error>;

    /// Retire the record. `Ok(true)` when a record was retired, `Ok(false)`
    /// when none exists; absence is reported, never thrown.
    async fn delete(&self, user_id: &AdUserId) -> Result<bool, Error>;
}
