//! Driving port for browsing the place catalogue.

use async_trait::async_trait;
use pagination::{Cursor, PageSize};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Place};

/// Decimal coordinates as emitted on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CoordinatesPayload {
    pub latitude: f64,
    pub longitude: f64,
}

/// Place record returned by listings, enriched with a resolved image URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlacePayload {
    pub id: String,
    pub name: String,
    pub category: String,
    pub coordinates: CoordinatesPayload,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub like_count: u64,
}

impl PlacePayload {
    /// Project a place, attaching an already resolved image URL.
    pub fn from_place(place: &Place, image_url: Option<String>) -> Self {
        let coordinates = place.coordinates();
        Self {
            id: place.id().to_string(),
            name: place.name().to_owned(),
            category: place.category().to_owned(),
            coordinates: CoordinatesPayload {
                latitude: coordinates.latitude(),
                longitude: coordinates.longitude(),
            },
            image: place.image().map(ToString::to_string),
            image_url,
            like_count: place.like_count(),
        }
    }
}

/// Request for one page of places.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPlacesRequest {
    pub page_size: PageSize,
    /// Resume strictly after the place id carried by this cursor.
    pub cursor: Option<Cursor<String>>,
}

/// One page of places plus the token that resumes after it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacesPage {
    pub places: Vec<PlacePayload>,
    pub next_cursor: Option<String>,
}

/// Domain use-case port for reading the place catalogue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlaceCatalogQuery: Send + Sync {
    /// Return one page of places in id order.
    ///
    /// `next_cursor` is set only when the page was full and more places
    /// follow.
    async fn list_page(&self, request: ListPlacesRequest) -> Result<PlacesPage, Error>;

    /// Return the first `limit` places.
    async fn list(&self, limit: PageSize) -> Result<Vec<PlacePayload>, Error> {
        let page = self
            .list_page(ListPlacesRequest {
                page_size: limit,
                cursor: None,
            })
            .await?;
        Ok(page.places)
    }
}
