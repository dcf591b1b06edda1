//! In-memory place catalogue ordered by place id.

use std::collections::BTreeMap;
use std::ops::Bound;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{PlaceRepository, PlaceRepositoryError};
use crate::domain::{Place, PlaceId};

/// Place repository backed by an ordered map.
#[derive(Debug, Default)]
pub struct InMemoryPlaceRepository {
    places: RwLock<BTreeMap<PlaceId, Place>>,
}

impl InMemoryPlaceRepository {
    /// Create a repository pre-populated with `places`.
    pub fn with_places(places: impl IntoIterator<Item = Place>) -> Self {
        let places = places
            .into_iter()
            .map(|place| (place.id().clone(), place))
            .collect();
        Self {
            places: RwLock::new(places),
        }
    }
}

#[async_trait]
impl PlaceRepository for InMemoryPlaceRepository {
    async fn list(
        &self,
        after: Option<PlaceId>,
        limit: usize,
    ) -> Result<Vec<Place>, PlaceRepositoryError> {
        let places = self.places.read().await;
        let lower = after.map_or(Bound::Unbounded, Bound::Excluded);
        Ok(places
            .range((lower, Bound::Unbounded))
            .take(limit)
            .map(|(_, place)| place.clone())
            .collect())
    }

    async fn upsert_batch(&self, places: &[Place]) -> Result<usize, PlaceRepositoryError> {
        let mut stored = self.places.write().await;
        for place in places {
            stored.insert(place.id().clone(), place.clone());
        }
        Ok(places.len())
    }
}
