//! Fact submission, listing and moderation endpoints.
//!
//! ```text
//! GET  /facts?placeId=eiffel
//! POST / {"placeId":"eiffel","submittedBy":"u1","description":"...","image":"img1","tags":["history"],"source":"book"}
//! POST /facts/eiffel/<factId>/moderation {"decision":"approved","moderatorId":"mod-1"}
//! ```

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{FactPayload, ModerateFactRequest, SubmitFactResponse};
use crate::domain::{FactSubmissionDraft, ModerationDecision, PlaceId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_value_error, missing_field_error, require_field,
};

const PLACE_ID_FIELD: FieldName = FieldName::new("placeId");
const DECISION_FIELD: FieldName = FieldName::new("decision");

/// Query parameters for `GET /facts`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListFactsQuery {
    /// Place whose facts to list. Required.
    pub place_id: Option<String>,
}

/// Submission body for `POST /`. Every field is required; presence is
/// checked by the domain so the error names the missing field.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFactRequest {
    #[schema(example = "eiffel")]
    pub place_id: Option<String>,
    #[schema(example = "u1")]
    pub submitted_by: Option<String>,
    pub description: Option<String>,
    /// Image name without extension.
    #[schema(example = "img1")]
    pub image: Option<String>,
    pub tags: Option<Vec<String>>,
    pub source: Option<String>,
}

impl From<SubmitFactRequest> for FactSubmissionDraft {
    fn from(value: SubmitFactRequest) -> Self {
        Self {
            place_id: value.place_id,
            submitted_by: value.submitted_by,
            description: value.description,
            image: value.image,
            tags: value.tags,
            source: value.source,
        }
    }
}

/// Moderation body for `POST /facts/{placeId}/{factId}/moderation`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModerateFactBody {
    /// `approved` or `rejected`.
    #[schema(value_type = Option<ModerationDecision>)]
    pub decision: Option<String>,
    #[schema(example = "mod-1")]
    pub moderator_id: Option<String>,
}

fn parse_decision(raw: Option<String>) -> ApiResult<ModerationDecision> {
    let raw = raw
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| missing_field_error(DECISION_FIELD))?;
    raw.trim()
        .parse()
        .map_err(|err| invalid_value_error(DECISION_FIELD, err))
}

/// List facts recorded for a place.
#[utoipa::path(
    get,
    path = "/facts",
    params(ListFactsQuery),
    responses(
        (status = 200, description = "Facts for the place", body = [FactPayload]),
        (status = 400, description = "placeId missing", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["facts"],
    operation_id = "listFacts"
)]
pub async fn list_facts(
    state: web::Data<HttpState>,
    query: web::Query<ListFactsQuery>,
) -> ApiResult<web::Json<Vec<FactPayload>>> {
    let raw = require_field(query.into_inner().place_id, PLACE_ID_FIELD)?;
    let place_id = PlaceId::new(raw).map_err(|err| invalid_value_error(PLACE_ID_FIELD, err))?;
    let facts = state.facts.list_by_place(&place_id).await?;
    Ok(web::Json(facts))
}

/// Submit a new fact in the pending state.
#[utoipa::path(
    post,
    path = "/",
    request_body = SubmitFactRequest,
    responses(
        (status = 201, description = "Fact created", body = SubmitFactResponse),
        (status = 400, description = "Missing or invalid field", body = ErrorSchema),
        (status = 409, description = "Fact identifier collision", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["facts"],
    operation_id = "submitFact"
)]
pub async fn submit_fact(
    state: web::Data<HttpState>,
    payload: web::Json<SubmitFactRequest>,
) -> ApiResult<HttpResponse> {
    let response = state
        .fact_commands
        .submit(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(response))
}

/// Approve or reject a pending fact.
#[utoipa::path(
    post,
    path = "/facts/{placeId}/{factId}/moderation",
    params(
        ("placeId" = String, Path, description = "Place the fact belongs to"),
        ("factId" = String, Path, description = "Fact identifier")
    ),
    request_body = ModerateFactBody,
    responses(
        (status = 200, description = "Moderated fact", body = FactPayload),
        (status = 400, description = "Missing or invalid field", body = ErrorSchema),
        (status = 404, description = "Fact not found", body = ErrorSchema),
        (status = 409, description = "Fact is no longer pending", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["facts"],
    operation_id = "moderateFact"
)]
pub async fn moderate_fact(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
    payload: web::Json<ModerateFactBody>,
) -> ApiResult<web::Json<FactPayload>> {
    let (place_id, fact_id) = path.into_inner();
    let ModerateFactBody {
        decision,
        moderator_id,
    } = payload.into_inner();
    let fact = state
        .fact_commands
        .moderate(ModerateFactRequest {
            place_id,
            fact_id,
            decision: parse_decision(decision)?,
            moderator_id,
        })
        .await?;
    Ok(web::Json(fact))
}

#[cfg(test)]
#[path = "facts_tests.rs"]
mod tests;
