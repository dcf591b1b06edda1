//! PostgreSQL-backed [`PlaceRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PlaceRepository, PlaceRepositoryError};
use crate::domain::{Place, PlaceDraft, PlaceId};

use super::error_mapping::{counter_from_db, counter_to_db, map_diesel_error, map_pool_error};
use super::models::{NewPlaceRow, PlaceRow};
use super::pool::DbPool;
use super::schema::places;

/// Diesel implementation of the place catalogue.
#[derive(Clone)]
pub struct DieselPlaceRepository {
    pool: DbPool,
}

impl DieselPlaceRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn query_error(message: &'static str) -> PlaceRepositoryError {
    PlaceRepositoryError::query(message)
}

fn connection_error(message: &'static str) -> PlaceRepositoryError {
    PlaceRepositoryError::connection(message)
}

fn diesel_error(error: diesel::result::Error) -> PlaceRepositoryError {
    map_diesel_error(&error, query_error, connection_error)
}

pub(crate) fn row_to_place(row: PlaceRow) -> Result<Place, PlaceRepositoryError> {
    let like_count = counter_from_db(row.like_count).map_err(query_error)?;
    Place::new(PlaceDraft {
        id: row.id,
        name: row.name,
        category: row.category,
        latitude: row.latitude,
        longitude: row.longitude,
        image: row.image,
        like_count,
    })
    .map_err(|err| PlaceRepositoryError::query(format!("stored place is invalid: {err}")))
}

fn place_to_row(place: &Place) -> Result<NewPlaceRow<'_>, PlaceRepositoryError> {
    let coordinates = place.coordinates();
    Ok(NewPlaceRow {
        id: place.id().as_str(),
        name: place.name(),
        category: place.category(),
        latitude: coordinates.latitude(),
        longitude: coordinates.longitude(),
        image: place.image().map(|image| image.as_str()),
        like_count: counter_to_db(place.like_count()).map_err(query_error)?,
    })
}

#[async_trait]
impl PlaceRepository for DieselPlaceRepository {
    async fn list(
        &self,
        after: Option<PlaceId>,
        limit: usize,
    ) -> Result<Vec<Place>, PlaceRepositoryError> {
        let limit = i64::try_from(limit).map_err(|_| query_error("page limit too large"))?;
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, PlaceRepositoryError::connection))?;

        let mut query = places::table
            .select(PlaceRow::as_select())
            .order(places::id.asc())
            .limit(limit)
            .into_boxed();
        if let Some(after) = after {
            query = query.filter(places::id.gt(String::from(after)));
        }

        let rows: Vec<PlaceRow> = query.load(&mut conn).await.map_err(diesel_error)?;
        rows.into_iter().map(row_to_place).collect()
    }

    async fn upsert_batch(&self, places: &[Place]) -> Result<usize, PlaceRepositoryError> {
        if places.is_empty() {
            return Ok(0);
        }
        let rows = places
            .iter()
            .map(place_to_row)
            .collect::<Result<Vec<_>, _>>()?;
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, PlaceRepositoryError::connection))?;

        diesel::insert_into(places::table)
            .values(&rows)
            .on_conflict(places::id)
            .do_update()
            .set((
                places::name.eq(excluded(places::name)),
                places::category.eq(excluded(places::category)),
                places::latitude.eq(excluded(places::latitude)),
                places::longitude.eq(excluded(places::longitude)),
                places::image.eq(excluded(places::image)),
                places::like_count.eq(excluded(places::like_count)),
            ))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn row() -> PlaceRow {
        PlaceRow {
            id: "eiffel".to_owned(),
            name: "Eiffel Tower".to_owned(),
            category: "Monument".to_owned(),
            latitude: 48.8584,
            longitude: 2.2945,
            image: Some("eiffel".to_owned()),
            like_count: 5,
        }
    }

    #[rstest]
    fn row_converts_to_place(row: PlaceRow) {
        let place = row_to_place(row).expect("valid row");
        assert_eq!(place.id().as_str(), "eiffel");
        assert_eq!(place.like_count(), 5);
        assert_eq!(place.image().map(|image| image.object_key()).as_deref(), Some("eiffel.jpeg"));
    }

    #[rstest]
    fn negative_like_count_is_a_query_error(mut row: PlaceRow) {
        row.like_count = -1;
        assert!(matches!(
            row_to_place(row),
            Err(PlaceRepositoryError::Query { .. })
        ));
    }

    #[rstest]
    fn place_round_trips_through_insert_row(row: PlaceRow) {
        let place = row_to_place(row).expect("valid row");
        let insert = place_to_row(&place).expect("row builds");
        assert_eq!(insert.id, "eiffel");
        assert_eq!(insert.image, Some("eiffel"));
        assert_eq!(insert.like_count, 5);
    }
}
