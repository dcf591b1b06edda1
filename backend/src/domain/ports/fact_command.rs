//! Driving port for fact submission and moderation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, FactSubmissionDraft, ModerationDecision};

use super::FactPayload;

/// Message returned after a successful submission.
pub const FACT_SUBMITTED_MESSAGE: &str = "Fact submitted successfully";

/// Response from submitting a fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFactResponse {
    pub message: String,
    pub fact_id: String,
}

/// Request to moderate a pending fact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModerateFactRequest {
    pub place_id: String,
    pub fact_id: String,
    pub decision: ModerationDecision,
    pub moderator_id: Option<String>,
}

/// Domain use-case port for fact writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FactCommand: Send + Sync {
    /// Validate a submission and store it as a pending fact.
    async fn submit(&self, draft: FactSubmissionDraft) -> Result<SubmitFactResponse, Error>;

    /// Approve or reject a pending fact.
    ///
    /// Fails with `not_found` when the fact does not exist and with
    /// `conflict` when it has already been moderated.
    async fn moderate(&self, request: ModerateFactRequest) -> Result<FactPayload, Error>;
}
