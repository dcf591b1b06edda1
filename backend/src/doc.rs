//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every content endpoint, the health probes and the
//! payload schemas. Swagger UI serves it in debug builds and the
//! `openapi-dump` binary prints it for external tooling.

use utoipa::OpenApi;

use crate::domain::ports::{
    CoordinatesPayload, FactPayload, PlacePayload, SubmitFactResponse, UpsertUserResponse,
};
use crate::domain::{ApprovalState, ModerationDecision};
use crate::inbound::http::facts::{ModerateFactBody, SubmitFactRequest};
use crate::inbound::http::fallback::InvalidResourceResponse;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::UpsertUserRequest;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Fun Facts content API",
        description = "Place catalogue, fact submission and moderation, and user profile upserts."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::places::list_places,
        crate::inbound::http::facts::list_facts,
        crate::inbound::http::facts::submit_fact,
        crate::inbound::http::facts::moderate_fact,
        crate::inbound::http::users::upsert_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        PlacePayload,
        CoordinatesPayload,
        FactPayload,
        ApprovalState,
        ModerationDecision,
        SubmitFactRequest,
        SubmitFactResponse,
        ModerateFactBody,
        UpsertUserRequest,
        UpsertUserResponse,
        InvalidResourceResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "places", description = "Read-only place catalogue"),
        (name = "facts", description = "Fact submission, listing and moderation"),
        (name = "users", description = "User profile metadata"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
