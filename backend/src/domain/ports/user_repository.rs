//! Port abstraction for user profile persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{UserProfile, UserProfileId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user profile repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a profile by identifier.
    async fn find(&self, user_id: &UserProfileId) -> Result<Option<UserProfile>, UserRepositoryError>;

    /// Insert or replace a profile.
    async fn upsert(&self, profile: &UserProfile) -> Result<(), UserRepositoryError>;
}
