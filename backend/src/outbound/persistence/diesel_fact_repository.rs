//! PostgreSQL-backed [`FactRepository`].
//!
//! Moderation is a conditional `UPDATE ... WHERE approval_state = 'pending'`
//! so only one of several concurrent decisions can succeed.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{FactRepository, FactRepositoryError};
use crate::domain::{Approval, ApprovalState, Fact, FactId, FactRecord, PlaceId};

use super::error_mapping::{
    counter_from_db, counter_to_db, is_unique_violation, map_diesel_error, map_pool_error,
};
use super::models::{FactModerationUpdate, FactRow, NewFactRow};
use super::pool::DbPool;
use super::schema::facts;

/// Diesel implementation of the fact store.
#[derive(Clone)]
pub struct DieselFactRepository {
    pool: DbPool,
}

impl DieselFactRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn query_error(message: &'static str) -> FactRepositoryError {
    FactRepositoryError::query(message)
}

fn connection_error(message: &'static str) -> FactRepositoryError {
    FactRepositoryError::connection(message)
}

fn diesel_error(error: diesel::result::Error) -> FactRepositoryError {
    map_diesel_error(&error, query_error, connection_error)
}

pub(crate) fn row_to_fact(row: FactRow) -> Result<Fact, FactRepositoryError> {
    let approval_state: ApprovalState = row
        .approval_state
        .parse()
        .map_err(|err| FactRepositoryError::query(format!("stored fact is invalid: {err}")))?;
    Fact::restore(FactRecord {
        place_id: row.place_id,
        fact_id: row.fact_id,
        submitted_by: row.submitted_by,
        created_at: row.created_at,
        description: row.description,
        like_count: counter_from_db(row.like_count).map_err(query_error)?,
        dislike_count: counter_from_db(row.dislike_count).map_err(query_error)?,
        approval_state,
        approved_by: row.approved_by,
        rejected_by: row.rejected_by,
        image: row.image,
        tags: row.tags,
        source: row.source,
    })
    .map_err(|err| FactRepositoryError::query(format!("stored fact is invalid: {err}")))
}

fn fact_to_row(fact: &Fact) -> Result<NewFactRow<'_>, FactRepositoryError> {
    Ok(NewFactRow {
        place_id: fact.place_id().as_str(),
        fact_id: fact.fact_id().as_str(),
        submitted_by: fact.submitted_by(),
        created_at: fact.created_at(),
        description: fact.description(),
        like_count: counter_to_db(fact.like_count()).map_err(query_error)?,
        dislike_count: counter_to_db(fact.dislike_count()).map_err(query_error)?,
        approval_state: fact.approval_state().as_str(),
        approved_by: fact.approval().approved_by(),
        rejected_by: fact.approval().rejected_by(),
        image: fact.image().map(|image| image.as_str()),
        tags: fact.tags().iter().cloned().collect(),
        source: fact.source(),
    })
}

fn moderation_update(approval: &Approval) -> FactModerationUpdate<'_> {
    FactModerationUpdate {
        approval_state: approval.state().as_str(),
        approved_by: approval.approved_by(),
        rejected_by: approval.rejected_by(),
    }
}

#[async_trait]
impl FactRepository for DieselFactRepository {
    async fn insert(&self, fact: &Fact) -> Result<(), FactRepositoryError> {
        let row = fact_to_row(fact)?;
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, FactRepositoryError::connection))?;

        diesel::insert_into(facts::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                if is_unique_violation(&err) {
                    FactRepositoryError::duplicate(fact.fact_id().as_str())
                } else {
                    diesel_error(err)
                }
            })
    }

    async fn list_by_place(&self, place_id: &PlaceId) -> Result<Vec<Fact>, FactRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, FactRepositoryError::connection))?;

        let rows: Vec<FactRow> = facts::table
            .filter(facts::place_id.eq(place_id.as_str()))
            .order((facts::created_at.asc(), facts::fact_id.asc()))
            .select(FactRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter().map(row_to_fact).collect()
    }

    async fn find(
        &self,
        place_id: &PlaceId,
        fact_id: &FactId,
    ) -> Result<Option<Fact>, FactRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, FactRepositoryError::connection))?;

        let row: Option<FactRow> = facts::table
            .filter(facts::place_id.eq(place_id.as_str()))
            .filter(facts::fact_id.eq(fact_id.as_str()))
            .select(FactRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_fact).transpose()
    }

    async fn apply_moderation(
        &self,
        place_id: &PlaceId,
        fact_id: &FactId,
        approval: &Approval,
    ) -> Result<bool, FactRepositoryError> {
        if approval.state() == ApprovalState::Pending {
            return Ok(false);
        }
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, FactRepositoryError::connection))?;

        let updated = diesel::update(
            facts::table
                .filter(facts::place_id.eq(place_id.as_str()))
                .filter(facts::fact_id.eq(fact_id.as_str()))
                .filter(facts::approval_state.eq(ApprovalState::Pending.as_str())),
        )
        .set(&moderation_update(approval))
        .execute(&mut conn)
        .await
        .map_err(diesel_error)?;
        Ok(updated == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use rstest::{fixture, rstest};

    #[fixture]
    fn row() -> FactRow {
        FactRow {
            place_id: "p1".to_owned(),
            fact_id: "f1".to_owned(),
            submitted_by: "u1".to_owned(),
            created_at: DateTime::parse_from_rfc3339("2026-01-02T03:04:05Z")
                .expect("RFC3339 fixture timestamp")
                .with_timezone(&Utc),
            description: "x".to_owned(),
            like_count: 0,
            dislike_count: 0,
            approval_state: "rejected".to_owned(),
            approved_by: None,
            rejected_by: Some("mod-1".to_owned()),
            image: Some("img1".to_owned()),
            tags: vec!["history".to_owned()],
            source: "book".to_owned(),
        }
    }

    #[rstest]
    fn row_converts_to_fact(row: FactRow) {
        let fact = row_to_fact(row).expect("valid row");
        assert_eq!(fact.approval_state(), ApprovalState::Rejected);
        assert_eq!(fact.approval().rejected_by(), Some("mod-1"));
        assert!(fact.tags().contains("history"));
    }

    #[rstest]
    #[case("archived", None, None)]
    #[case("approved", None, Some("mod-1"))]
    fn invalid_moderation_columns_are_query_errors(
        mut row: FactRow,
        #[case] state: &str,
        #[case] approved_by: Option<&str>,
        #[case] rejected_by: Option<&str>,
    ) {
        row.approval_state = state.to_owned();
        row.approved_by = approved_by.map(str::to_owned);
        row.rejected_by = rejected_by.map(str::to_owned);
        assert!(matches!(
            row_to_fact(row),
            Err(FactRepositoryError::Query { .. })
        ));
    }

    #[rstest]
    fn moderation_update_writes_only_the_deciding_moderator() {
        let approval = Approval::Approved {
            moderator: "mod-2".to_owned(),
        };
        let update = moderation_update(&approval);
        assert_eq!(update.approval_state, "approved");
        assert_eq!(update.approved_by, Some("mod-2"));
        assert_eq!(update.rejected_by, None);
    }

    #[rstest]
    fn insert_row_mirrors_fact(row: FactRow) {
        let fact = row_to_fact(row).expect("valid row");
        let insert = fact_to_row(&fact).expect("row builds");
        assert_eq!(insert.approval_state, "rejected");
        assert_eq!(insert.tags, vec!["history".to_owned()]);
        assert_eq!(insert.image, Some("img1"));
    }
}
