//! Place catalogue endpoint.
//!
//! ```text
//! GET /places?pageSize=20&cursor=<token>
//! ```
//!
//! The body is a JSON array of places. When more places may follow, the
//! `Next-Cursor` response header carries the token for the next request.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::ports::{ListPlacesRequest, PlacePayload};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_cursor, parse_page_size};

/// Response header carrying the continuation token.
pub const NEXT_CURSOR_HEADER: &str = "Next-Cursor";

const PAGE_SIZE_FIELD: FieldName = FieldName::new("pageSize");
const CURSOR_FIELD: FieldName = FieldName::new("cursor");

/// Query parameters for `GET /places`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListPlacesQuery {
    /// Items per page, 1 or more; values above 100 are clamped. Defaults to 20.
    #[param(value_type = Option<u32>, example = 20)]
    pub page_size: Option<String>,
    /// Token from a previous `Next-Cursor` header.
    pub cursor: Option<String>,
}

impl TryFrom<ListPlacesQuery> for ListPlacesRequest {
    type Error = crate::domain::Error;

    fn try_from(query: ListPlacesQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            page_size: parse_page_size(query.page_size.as_deref(), PAGE_SIZE_FIELD)?,
            cursor: parse_cursor(query.cursor.as_deref(), CURSOR_FIELD)?,
        })
    }
}

/// List places.
#[utoipa::path(
    get,
    path = "/places",
    params(ListPlacesQuery),
    responses(
        (
            status = 200,
            description = "Places in catalogue order",
            headers(("Next-Cursor" = String, description = "Token for the next page, present when more places may follow")),
            body = [PlacePayload]
        ),
        (status = 400, description = "Invalid page size or cursor", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["places"],
    operation_id = "listPlaces"
)]
pub async fn list_places(
    state: web::Data<HttpState>,
    query: web::Query<ListPlacesQuery>,
) -> ApiResult<HttpResponse> {
    let request = ListPlacesRequest::try_from(query.into_inner())?;
    let page = state.places.list_page(request).await?;

    let mut response = HttpResponse::Ok();
    if let Some(token) = page.next_cursor {
        response.insert_header((NEXT_CURSOR_HEADER, token));
    }
    Ok(response.json(page.places))
}
