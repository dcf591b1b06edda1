//! Driving port for user profile upserts.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, UserProfileDraft};

/// Whether an upsert created or overwrote a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

impl UpsertOutcome {
    /// Client-facing confirmation text.
    pub const fn message(self) -> &'static str {
        match self {
            Self::Created => "User metadata added successfully",
            Self::Updated => "User metadata updated successfully",
        }
    }
}

/// Response body for a profile upsert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertUserResponse {
    pub message: String,
    pub user_id: String,
}

impl UpsertUserResponse {
    pub fn new(outcome: UpsertOutcome, user_id: impl Into<String>) -> Self {
        Self {
            message: outcome.message().to_owned(),
            user_id: user_id.into(),
        }
    }
}

/// Domain use-case port for writing user profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectoryCommand: Send + Sync {
    /// Create the profile on first write, overwrite it afterwards.
    async fn upsert(&self, draft: UserProfileDraft) -> Result<UpsertUserResponse, Error>;
}
