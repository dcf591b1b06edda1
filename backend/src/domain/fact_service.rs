//! Fact domain services.
//!
//! [`FactService`] implements both fact driving ports: submission and
//! moderation on the command side, per-place listing on the query side.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::image_urls::{resolve_all, resolve_optional};
use crate::domain::ports::{
    FACT_SUBMITTED_MESSAGE, FactCommand, FactPayload, FactQuery, FactRepository,
    FactRepositoryError, ImageResolver, ModerateFactRequest, SubmitFactResponse,
};
use crate::domain::{
    ApprovalState, Error, Fact, FactId, FactSubmission, FactSubmissionDraft,
    FactValidationError, PlaceId,
};

fn map_repository_error(error: FactRepositoryError) -> Error {
    match error {
        FactRepositoryError::Connection { message } => {
            warn!(%message, "fact repository unavailable");
            Error::service_unavailable(format!("fact repository unavailable: {message}"))
        }
        FactRepositoryError::Query { message } => {
            warn!(%message, "fact repository query failed");
            Error::internal(format!("fact repository error: {message}"))
        }
        FactRepositoryError::Duplicate { fact_id } => {
            Error::conflict(format!("fact {fact_id} already exists"))
        }
    }
}

pub(crate) fn map_validation_error(error: FactValidationError) -> Error {
    match error {
        FactValidationError::MissingField { field } => {
            Error::invalid_request(format!("missing required field: {field}"))
                .with_details(json!({ "field": field, "code": "missing_field" }))
        }
        FactValidationError::InvalidField { field, reason } => {
            Error::invalid_request(format!("{field} is invalid: {reason}"))
                .with_details(json!({ "field": field, "code": "invalid_value" }))
        }
        FactValidationError::InconsistentModeration { reason } => {
            Error::internal(format!("stored fact is inconsistent: {reason}"))
        }
    }
}

fn parse_identity(place_id: String, fact_id: String) -> Result<(PlaceId, FactId), Error> {
    let place_id = PlaceId::new(place_id).map_err(|_| {
        map_validation_error(FactValidationError::MissingField { field: "placeId" })
    })?;
    let fact_id = FactId::new(fact_id).map_err(map_validation_error)?;
    Ok((place_id, fact_id))
}

fn fact_not_found(place_id: &PlaceId, fact_id: &FactId) -> Error {
    Error::not_found(format!("fact {fact_id} not found for place {place_id}"))
}

/// Fact service implementing [`FactCommand`] and [`FactQuery`].
#[derive(Clone)]
pub struct FactService<R: ?Sized> {
    fact_repo: Arc<R>,
    images: Arc<dyn ImageResolver>,
    clock: Arc<dyn Clock>,
    approved_only: bool,
}

impl<R: ?Sized> FactService<R> {
    /// Create a service that lists every fact regardless of moderation state.
    pub fn new(fact_repo: Arc<R>, images: Arc<dyn ImageResolver>, clock: Arc<dyn Clock>) -> Self {
        Self {
            fact_repo,
            images,
            clock,
            approved_only: false,
        }
    }

    /// Restrict listings to approved facts.
    #[must_use]
    pub fn with_approved_only(mut self, approved_only: bool) -> Self {
        self.approved_only = approved_only;
        self
    }
}

#[async_trait]
impl<R> FactCommand for FactService<R>
where
    R: FactRepository + ?Sized,
{
    async fn submit(&self, draft: FactSubmissionDraft) -> Result<SubmitFactResponse, Error> {
        let submission = FactSubmission::try_from(draft).map_err(map_validation_error)?;
        let fact = Fact::submit(submission, FactId::generate(), self.clock.utc());

        self.fact_repo
            .insert(&fact)
            .await
            .map_err(map_repository_error)?;

        info!(
            place_id = %fact.place_id(),
            fact_id = %fact.fact_id(),
            submitted_by = fact.submitted_by(),
            "fact submitted"
        );

        Ok(SubmitFactResponse {
            message: FACT_SUBMITTED_MESSAGE.to_owned(),
            fact_id: fact.fact_id().to_string(),
        })
    }

    async fn moderate(&self, request: ModerateFactRequest) -> Result<FactPayload, Error> {
        let ModerateFactRequest {
            place_id,
            fact_id,
            decision,
            moderator_id,
        } = request;
        let (place_id, fact_id) = parse_identity(place_id, fact_id)?;
        let moderator = moderator_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| {
                map_validation_error(FactValidationError::MissingField {
                    field: "moderatorId",
                })
            })?;

        let current = self
            .fact_repo
            .find(&place_id, &fact_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| fact_not_found(&place_id, &fact_id))?;

        let moderated = current
            .moderate(decision, moderator)
            .map_err(|err| Error::conflict(err.to_string()))?;

        let applied = self
            .fact_repo
            .apply_moderation(&place_id, &fact_id, moderated.approval())
            .await
            .map_err(map_repository_error)?;
        if !applied {
            return Err(Error::conflict(
                "fact was moderated concurrently and is no longer pending",
            ));
        }

        info!(
            place_id = %place_id,
            fact_id = %fact_id,
            approval_state = %moderated.approval_state(),
            "fact moderated"
        );

        let image_url = resolve_optional(self.images.as_ref(), moderated.image()).await?;
        Ok(FactPayload::from_fact(&moderated, image_url))
    }
}

#[async_trait]
impl<R> FactQuery for FactService<R>
where
    R: FactRepository + ?Sized,
{
    async fn list_by_place(&self, place_id: &PlaceId) -> Result<Vec<FactPayload>, Error> {
        let mut facts = self
            .fact_repo
            .list_by_place(place_id)
            .await
            .map_err(map_repository_error)?;
        if self.approved_only {
            facts.retain(|fact| fact.approval_state() == ApprovalState::Approved);
        }

        resolve_all(
            self.images.as_ref(),
            facts,
            Fact::image,
            FactPayload::from_fact,
        )
        .await
    }
}

#[cfg(test)]
#[path = "fact_service_tests.rs"]
mod tests;
