//! PostgreSQL-backed [`UserRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{UserProfile, UserProfileId, UserProfileRecord};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewUserProfileRow, UserProfileRow};
use super::pool::DbPool;
use super::schema::user_profiles;

/// Diesel implementation of the user directory store.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    map_diesel_error(
        &error,
        UserRepositoryError::query,
        UserRepositoryError::connection,
    )
}

pub(crate) fn row_to_profile(row: UserProfileRow) -> Result<UserProfile, UserRepositoryError> {
    UserProfile::restore(UserProfileRecord {
        user_id: row.user_id,
        username: row.username,
        email: row.email,
        profile_picture: row.profile_picture,
        user_category: row.user_category,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
    .map_err(|err| UserRepositoryError::query(format!("stored profile is invalid: {err}")))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find(&self, user_id: &UserProfileId) -> Result<Option<UserProfile>, UserRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserRepositoryError::connection))?;

        let row: Option<UserProfileRow> = user_profiles::table
            .filter(user_profiles::user_id.eq(user_id.as_str()))
            .select(UserProfileRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_profile).transpose()
    }

    async fn upsert(&self, profile: &UserProfile) -> Result<(), UserRepositoryError> {
        let row = NewUserProfileRow {
            user_id: profile.user_id().as_str(),
            username: profile.username(),
            email: profile.email(),
            profile_picture: profile.profile_picture(),
            user_category: profile.user_category(),
            created_at: profile.created_at(),
            updated_at: profile.updated_at(),
        };
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserRepositoryError::connection))?;

        diesel::insert_into(user_profiles::table)
            .values(&row)
            .on_conflict(user_profiles::user_id)
            .do_update()
            .set((
                user_profiles::username.eq(excluded(user_profiles::username)),
                user_profiles::email.eq(excluded(user_profiles::email)),
                user_profiles::profile_picture.eq(excluded(user_profiles::profile_picture)),
                user_profiles::user_category.eq(excluded(user_profiles::user_category)),
                user_profiles::updated_at.eq(excluded(user_profiles::updated_at)),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }
}
