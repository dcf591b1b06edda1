//! Catch-all for unrecognised resources.
//!
//! Any method/path pair without a handler answers 404 with the fixed body
//! `{"error":"Invalid resource"}`, whatever the query string holds.

use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body returned for unrecognised resources.
pub const INVALID_RESOURCE_MESSAGE: &str = "Invalid resource";

/// Fixed 404 payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InvalidResourceResponse {
    #[schema(example = "Invalid resource")]
    pub error: String,
}

/// Default service for the application and for resources whose method does
/// not match.
pub async fn invalid_resource() -> HttpResponse {
    HttpResponse::NotFound().json(InvalidResourceResponse {
        error: INVALID_RESOURCE_MESSAGE.to_owned(),
    })
}
