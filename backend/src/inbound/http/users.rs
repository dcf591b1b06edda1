//! User profile upsert endpoint.
//!
//! ```text
//! POST /users {"userId":"u1","username":"ada","email":"ada@example.com"}
//! ```

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::UserProfileDraft;
use crate::domain::ports::UpsertUserResponse;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Upsert body for `POST /users`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertUserRequest {
    #[schema(example = "u1")]
    pub user_id: Option<String>,
    #[schema(example = "ada")]
    pub username: Option<String>,
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    pub profile_picture: Option<String>,
    /// Defaults to `Rookie` when omitted, on updates too.
    #[schema(example = "Rookie")]
    pub user_category: Option<String>,
}

impl From<UpsertUserRequest> for UserProfileDraft {
    fn from(value: UpsertUserRequest) -> Self {
        Self {
            user_id: value.user_id,
            username: value.username,
            email: value.email,
            profile_picture: value.profile_picture,
            user_category: value.user_category,
        }
    }
}

/// Create or overwrite a user profile.
#[utoipa::path(
    post,
    path = "/users",
    request_body = UpsertUserRequest,
    responses(
        (status = 201, description = "Profile created or updated", body = UpsertUserResponse),
        (status = 400, description = "Missing required field", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "upsertUser"
)]
pub async fn upsert_user(
    state: web::Data<HttpState>,
    payload: web::Json<UpsertUserRequest>,
) -> ApiResult<HttpResponse> {
    let response = state.users.upsert(payload.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(response))
}
