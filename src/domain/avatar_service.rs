//! Avatar lifecycle service.
//!
//! Implements the driving [`AvatarStore`] port over any
//! [`AvatarRepository`], synthesising identifiers and timestamps and
//! translating repository failures into domain errors.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{AvatarRepository, AvatarRepositoryError, AvatarStore};
use crate::domain::{AdUserId, AvatarRecord, AvatarSelection, Error};

/// Avatar store backed by a repository port.
#[derive(Clone)]
pub struct AvatarService<R> {
    repository: Arc<R>,
}

impl<R> AvatarService<R> {
    /// Create a new service over the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R: AvatarRepository> AvatarService<R> {
    fn map_repository_error(error: AvatarRepositoryError) -> Error {
        match error {
            AvatarRepositoryError::Storage { message } => {
                Error::internal(format!("avatar storage failed: {message}"))
            }
            AvatarRepositoryError::DuplicateUser { user_id } => {
                Error::already_exists("Avatar already exists")
                    .with_details(json!({ "userId": user_id }))
            }
            AvatarRepositoryError::MissingUser { user_id } => {
                Error::not_found("Avatar not found").with_details(json!({ "userId": user_id }))
            }
        }
    }
}

#[async_trait]
impl<R: AvatarRepository> AvatarStore for AvatarService<R> {
    async fn create(
        &self,
        user_id: AdUserId,
        selection: AvatarSelection,
    ) -> Result<AvatarRecord, Error> {
        let record = AvatarRecord::create(user_id, selection, Utc::now());
        let stored = self
            .repository
            .insert_new(record)
            .await
            .map_err(Self::map_repository_error)?;
        info!(user_id = %stored.user_id, avatar_id = %stored.id, "avatar created");
        Ok(stored)
    }

    async fn get(&self, user_id: &AdUserId) -> Result<Option<AvatarRecord>, Error> {
        self.repository
            .find_by_user_id(user_id)
            .await
            .map_err(Self::map_repository_error)
    }

    async fn update(
        &self,
        user_id: &AdUserId,
        selection: AvatarSelection,
    ) -> Result<AvatarRecord, Error> {
        let updated = self
            .repository
            .replace_selection(user_id, selection, Utc::now())
            .await
            .map_err(Self::map_repository_error)?;
        info!(user_id = %user_id, "avatar updated");
        Ok(updated)
    }

    async fn delete(&self, user_id: &AdUserId) -> Result<bool, Error> {
        let retired = self
            .repository
            .retire(user_id, Utc::now())
            .await
            .map_err(Self::map_repository_error)?;
        match retired {
            Some(_) => {
                info!(user_id = %user_id, "avatar retired");
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
