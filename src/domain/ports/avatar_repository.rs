//! Driven port for avatar record storage.
//!
//! The [`AvatarRepository`] trait defines the contract for keeping at most
//! one record per user. Every mutation is a single atomic check-and-set from
//! the caller's perspective: adapters must not expose a window in which two
//! concurrent creates for the same user can both observe "absent" and both
//! succeed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{AdUserId, AvatarRecord, AvatarSelection};

use super::define_port_error;

define_port_error! {
    /// Errors raised by avatar repository adapters.
    pub enum AvatarRepositoryError {
        /// Underlying storage failed (poisoned lock, I/O, connectivity).
        Storage { message: String } =>
            "avatar storage failed: {message}",
        /// A record, active or retired, is already keyed by this user.
        DuplicateUser { user_id: String } =>
            "avatar already stored for user {user_id}",
        /// No record exists for this user.
        MissingUser { user_id: String } =>
            "no avatar stored for user {user_id}",
    }
}

/// Port for avatar record storage and retrieval.
///
/// # Uniqueness semantics
///
/// Collisions are decided on existence, not activity: a retired record
/// (`is_active = false`) still occupies its key and makes `insert_new` fail.
/// Lookups never filter on the active flag. This is deliberate policy, not a
/// gap; see the driving port docs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AvatarRepository: Send + Sync {
    /// Fetch the record keyed by `user_id`, retired or not.
    ///
    /// Returns `None` when no record was ever created for this user.
    async fn find_by_user_id(
        &self,
        user_id: &AdUserId,
    ) -> Result<Option<AvatarRecord>, AvatarRepositoryError>;

    /// Insert a freshly created record, failing with
    /// [`AvatarRepositoryError::DuplicateUser`] when any record is already
    /// keyed by the same user. The existence check and the insert are one
    /// atomic step.
    async fn insert_new(
        &self,
        record: AvatarRecord,
    ) -> Result<AvatarRecord, AvatarRepositoryError>;

    /// Replace the mutable selection fields of the existing record,
    /// refreshing `updated_at` and preserving `id`, `created_at`, the key,
    /// and the active flag. Fails with
    /// [`AvatarRepositoryError::MissingUser`] when absent.
    async fn replace_selection(
        &self,
        user_id: &AdUserId,
        selection: AvatarSelection,
        updated_at: DateTime<Utc>,
    ) -> Result<AvatarRecord, AvatarRepositoryError>;

    /// Retire the record (set `is_active = false`, refresh `updated_at`)
    /// without removing it. Returns the retired record, or `None` when no
    /// record exists; mere absence is not an error here.
    async fn retire(
        &self,
        user_id: &AdUserId,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<AvatarRecord>, AvatarRepositoryError>;
}

/// Fixture implementation for tests that do not exercise storage behaviour.
///
/// Lookups always miss, inserts echo the record back without keeping it,
/// replacements report a missing user, and retire reports absence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAvatarRepository;

#[async_trait]
impl AvatarRepository for FixtureAvatarRepository {
    async fn find_by_user_id(
        &self,
        _user_id: &AdUserId,
    ) -> Result<Option<AvatarRecord>, AvatarRepositoryError> {
        Ok(None)
    }

    async fn insert_new(
        &self,
        record: AvatarRecord,
    ) -> Result<AvatarRecord, AvatarRepositoryError> {
        Ok(record)
    }

    async fn replace_selection(
        &self,
        user_id: &AdUserId,
        _selection: AvatarSelection,
        _updated_at: DateTime<Utc>,
    ) -> Result<AvatarRecord, AvatarRepositoryError> {
        Err(AvatarRepositoryError::missing_user(user_id.as_str()))
    }

    async fn retire(
        &self,
        _user_id: &AdUserId,
        _updated_at: DateTime<Utc>,
    ) -> Result<Option<AvatarRecord>, AvatarRepositoryError> {
        Ok(None)
    }
}
