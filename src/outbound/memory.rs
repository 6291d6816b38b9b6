//! In-memory avatar repository.
//!
//! The store is one mutex-guarded map keyed by `AdUserId`. Every mutation
//! takes the lock once and performs its existence check and write inside
//! the same critical section, so two concurrent creates for the same user
//! cannot both observe "absent" and both succeed.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{AvatarRepository, AvatarRepositoryError};
use crate::domain::{AdUserId, AvatarRecord, AvatarSelection};

/// Process-local avatar storage.
#[derive(Debug, Default)]
pub struct InMemoryAvatarRepository {
    records: Mutex<HashMap<AdUserId, AvatarRecord>>,
}

impl InMemoryAvatarRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(
        &self,
    ) -> Result<MutexGuard<'_, HashMap<AdUserId, AvatarRecord>>, AvatarRepositoryError> {
        self.records
            .lock()
            .map_err(|_| AvatarRepositoryError::storage("avatar record map lock poisoned"))
    }
}

#[async_trait]
impl AvatarRepository for InMemoryAvatarRepository {
    async fn find_by_user_id(
        &self,
        user_id: &AdUserId,
    ) -> Result<Option<AvatarRecord>, AvatarRepositoryError> {
        Ok(self.lock()?.get(user_id).cloned())
    }

    async fn insert_new(
        &self,
        record: AvatarRecord,
    ) -> Result<AvatarRecord, AvatarRepositoryError> {
        let mut records = self.lock()?;
        if records.contains_key(&record.user_id) {
            return Err(AvatarRepositoryError::duplicate_user(
                record.user_id.as_str(),
            ));
        }
        records.insert(record.user_id.clone(), record.clone());
        Ok(record)
    }

    async fn replace_selection(
        &self,
        user_id: &AdUserId,
        selection: AvatarSelection,
        updated_at: DateTime<Utc>,
    ) -> Result<AvatarRecord, AvatarRepositoryError> {
        let mut records = self.lock()?;
        let Some(existing) = records.get(user_id) else {
            return Err(AvatarRepositoryError::missing_user(user_id.as_str()));
        };
        let updated = existing.clone().with_selection(selection, updated_at);
        records.insert(user_id.clone(), updated.clone());
        Ok(updated)
    }

    async fn retire(
        &self,
        user_id: &AdUserId,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<AvatarRecord>, AvatarRepositoryError> {
        let mut records = self.lock()?;
        let Some(existing) = records.get(user_id) else {
            return Ok(None);
        };
        let retired = existing.clone().retired(updated_at);
        records.insert(user_id.clone(), retired.clone());
        Ok(Some(retired))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AvatarType, AvatarUrl, Gender};

    fn user_id() -> AdUserId {
        AdUserId::new("u1").expect("valid id")
    }

    fn selection(avatar_type: AvatarType, url: &str) -> AvatarSelection {
        AvatarSelection {
            avatar_type,
            avatar_url: AvatarUrl::new(url).expect("valid url"),
            gender: avatar_type.gender(),
        }
    }

    fn fresh_record() -> AvatarRecord {
        AvatarRecord::create(
            user_id(),
            selection(AvatarType::Male1, "http://x/a.glb"),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn insert_then_find_returns_the_active_record() {
        let repo = InMemoryAvatarRepository::new();
        let stored = repo.insert_new(fresh_record()).await.expect("insert");

        let found = repo
            .find_by_user_id(&user_id())
            .await
            .expect("lookup")
            .expect("record present");
        assert_eq!(found, stored);
        assert!(found.is_active);
    }

    #[tokio::test]
    async fn insert_collides_on_any_existing_record() {
        let repo = InMemoryAvatarRepository::new();
        repo.insert_new(fresh_record()).await.expect("first insert");

        let err = repo
            .insert_new(fresh_record())
            .await
            .expect_err("second insert collides");
        assert_eq!(err, AvatarRepositoryError::duplicate_user("u1"));
    }

    #[tokio::test]
    async fn insert_collides_even_after_retirement() {
        let repo = InMemoryAvatarRepository::new();
        repo.insert_new(fresh_record()).await.expect("insert");
        repo.retire(&user_id(), Utc::now())
            .await
            .expect("retire")
            .expect("record retired");

        // Existence, not activity, decides the collision.
        let err = repo
            .insert_new(fresh_record())
            .await
            .expect_err("retired record still occupies the key");
        assert_eq!(err, AvatarRepositoryError::duplicate_user("u1"));
    }

    #[tokio::test]
    async fn replace_preserves_identity_and_overwrites_fields_exactly() {
        let repo = InMemoryAvatarRepository::new();
        let stored = repo.insert_new(fresh_record()).await.expect("insert");

        let later = stored.updated_at + chrono::Duration::seconds(3);
        let updated = repo
            .replace_selection(&user_id(), selection(AvatarType::Male2, "http://x/b.glb"), later)
            .await
            .expect("replace");

        assert_eq!(updated.id, stored.id);
        assert_eq!(updated.created_at, stored.created_at);
        assert_eq!(updated.updated_at, later);
        assert_eq!(updated.avatar_type, AvatarType::Male2);
        assert_eq!(updated.avatar_url.as_str(), "http://x/b.glb");
        assert!(updated.is_active);

        let found = repo
            .find_by_user_id(&user_id())
            .await
            .expect("lookup")
            .expect("record present");
        assert_eq!(found, updated);
    }

    #[tokio::test]
    async fn replace_misses_when_no_record_exists() {
        let repo = InMemoryAvatarRepository::new();
        let err = repo
            .replace_selection(
                &user_id(),
                selection(AvatarType::Female1, "http://x/f.glb"),
                Utc::now(),
            )
            .await
            .expect_err("nothing to replace");
        assert_eq!(err, AvatarRepositoryError::missing_user("u1"));
    }

    #[tokio::test]
    async fn retire_keeps_the_record_readable() {
        let repo = InMemoryAvatarRepository::new();
        let stored = repo.insert_new(fresh_record()).await.expect("insert");

        let later = stored.updated_at + chrono::Duration::seconds(3);
        let retired = repo
            .retire(&user_id(), later)
            .await
            .expect("retire")
            .expect("record retired");
        assert!(!retired.is_active);
        assert_eq!(retired.updated_at, later);

        let found = repo
            .find_by_user_id(&user_id())
            .await
            .expect("lookup")
            .expect("record still present");
        assert!(!found.is_active);
        assert_eq!(found.id, stored.id);
    }

    #[tokio::test]
    async fn retire_reports_absence_without_erroring() {
        let repo = InMemoryAvatarRepository::new();
        let outcome = repo.retire(&user_id(), Utc::now()).await.expect("retire");
        assert!(outcome.is_none());
    }
}
