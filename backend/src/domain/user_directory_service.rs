//! User directory service: create-or-overwrite profile writes.
//!
//! The write is read-then-write without locking, so concurrent upserts of the
//! same `userId` resolve as last writer wins.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{
    UpsertOutcome, UpsertUserResponse, UserDirectoryCommand, UserRepository, UserRepositoryError,
};
use crate::domain::{Error, UserProfileDraft, UserProfileUpsert, UserProfileValidationError};

fn map_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            warn!(%message, "user repository unavailable");
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            warn!(%message, "user repository query failed");
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

fn map_validation_error(error: UserProfileValidationError) -> Error {
    match error {
        UserProfileValidationError::MissingField { field } => {
            Error::invalid_request(format!("missing required field: {field}"))
                .with_details(json!({ "field": field, "code": "missing_field" }))
        }
    }
}

/// User directory service implementing [`UserDirectoryCommand`].
#[derive(Clone)]
pub struct UserDirectoryService<R: ?Sized> {
    user_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R: ?Sized> UserDirectoryService<R> {
    pub fn new(user_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { user_repo, clock }
    }
}

#[async_trait]
impl<R> UserDirectoryCommand for UserDirectoryService<R>
where
    R: UserRepository + ?Sized,
{
    async fn upsert(&self, draft: UserProfileDraft) -> Result<UpsertUserResponse, Error> {
        let upsert = UserProfileUpsert::try_from(draft).map_err(map_validation_error)?;
        let user_id = upsert.user_id().clone();

        let existing = self
            .user_repo
            .find(&user_id)
            .await
            .map_err(map_repository_error)?;
        let now = self.clock.utc();
        let (profile, outcome) = match existing {
            Some(current) => (upsert.apply(current, now), UpsertOutcome::Updated),
            None => (upsert.create(now), UpsertOutcome::Created),
        };

        self.user_repo
            .upsert(&profile)
            .await
            .map_err(map_repository_error)?;

        match outcome {
            UpsertOutcome::Created => info!(user_id = %user_id, "user profile created"),
            UpsertOutcome::Updated => info!(user_id = %user_id, "user profile updated"),
        }

        Ok(UpsertUserResponse::new(outcome, user_id.as_str()))
    }
}
