//! In-memory user profile store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{UserProfile, UserProfileId};

/// User repository backed by a hash map keyed by user id.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    profiles: RwLock<HashMap<UserProfileId, UserProfile>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find(&self, user_id: &UserProfileId) -> Result<Option<UserProfile>, UserRepositoryError> {
        Ok(self.profiles.read().await.get(user_id).cloned())
    }

    async fn upsert(&self, profile: &UserProfile) -> Result<(), UserRepositoryError> {
        self.profiles
            .write()
            .await
            .insert(profile.user_id().clone(), profile.clone());
        Ok(())
    }
}
