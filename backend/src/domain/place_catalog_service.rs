//! Place catalogue query service.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::Page;
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::image_urls::resolve_all;
use crate::domain::ports::{
    ImageResolver, ListPlacesRequest, PlaceCatalogQuery, PlacePayload, PlaceRepository,
    PlaceRepositoryError, PlacesPage,
};
use crate::domain::{Error, Place, PlaceId};

fn map_repository_error(error: PlaceRepositoryError) -> Error {
    match error {
        PlaceRepositoryError::Connection { message } => {
            warn!(%message, "place repository unavailable");
            Error::service_unavailable(format!("place repository unavailable: {message}"))
        }
        PlaceRepositoryError::Query { message } => {
            warn!(%message, "place repository query failed");
            Error::internal(format!("place repository error: {message}"))
        }
    }
}

/// Catalogue service implementing [`PlaceCatalogQuery`] with keyset paging.
#[derive(Clone)]
pub struct PlaceCatalogService<R: ?Sized> {
    place_repo: Arc<R>,
    images: Arc<dyn ImageResolver>,
}

impl<R: ?Sized> PlaceCatalogService<R> {
    pub fn new(place_repo: Arc<R>, images: Arc<dyn ImageResolver>) -> Self {
        Self { place_repo, images }
    }
}

#[async_trait]
impl<R> PlaceCatalogQuery for PlaceCatalogService<R>
where
    R: PlaceRepository + ?Sized,
{
    async fn list_page(&self, request: ListPlacesRequest) -> Result<PlacesPage, Error> {
        let ListPlacesRequest { page_size, cursor } = request;
        let after = cursor
            .map(|cursor| PlaceId::new(cursor.into_key()))
            .transpose()
            .map_err(|_| {
                Error::invalid_request("cursor does not reference a place")
                    .with_details(json!({ "field": "cursor", "code": "invalid_cursor" }))
            })?;

        let rows = self
            .place_repo
            .list(after, page_size.get() + 1)
            .await
            .map_err(map_repository_error)?;
        let page = Page::from_overfetch(rows, page_size, |place: &Place| place.id().to_string());
        let (places, next) = page.into_parts();
        let next_cursor = next
            .map(|cursor| cursor.encode())
            .transpose()
            .map_err(|err| Error::internal(format!("failed to encode cursor: {err}")))?;

        let places = resolve_all(
            self.images.as_ref(),
            places,
            Place::image,
            PlacePayload::from_place,
        )
        .await?;
        debug!(count = places.len(), has_more = next_cursor.is_some(), "listed places");

        Ok(PlacesPage {
            places,
            next_cursor,
        })
    }
}
