//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer; repositories convert them
//! to and from domain entities.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{facts, places, user_profiles};

/// Row read from the `places` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = places)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PlaceRow {
    pub id: String,
    pub name: String,
    pub category: String,
    pub latitude: f64,
    pub longitude: f64,
    pub image: Option<String>,
    pub like_count: i64,
}

/// Insertable place row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = places)]
pub(crate) struct NewPlaceRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub category: &'a str,
    pub latitude: f64,
    pub longitude: f64,
    pub image: Option<&'a str>,
    pub like_count: i64,
}

/// Row read from the `facts` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = facts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FactRow {
    pub place_id: String,
    pub fact_id: String,
    pub submitted_by: String,
    pub created_at: DateTime<Utc>,
    pub description: String,
    pub like_count: i64,
    pub dislike_count: i64,
    pub approval_state: String,
    pub approved_by: Option<String>,
    pub rejected_by: Option<String>,
    pub image: Option<String>,
    pub tags: Vec<String>,
    pub source: String,
}

/// Insertable fact row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = facts)]
pub(crate) struct NewFactRow<'a> {
    pub place_id: &'a str,
    pub fact_id: &'a str,
    pub submitted_by: &'a str,
    pub created_at: DateTime<Utc>,
    pub description: &'a str,
    pub like_count: i64,
    pub dislike_count: i64,
    pub approval_state: &'a str,
    pub approved_by: Option<&'a str>,
    pub rejected_by: Option<&'a str>,
    pub image: Option<&'a str>,
    pub tags: Vec<String>,
    pub source: &'a str,
}

/// Moderation columns written by the compare-and-set update.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = facts)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct FactModerationUpdate<'a> {
    pub approval_state: &'a str,
    pub approved_by: Option<&'a str>,
    pub rejected_by: Option<&'a str>,
}

/// Row read from the `user_profiles` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = user_profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserProfileRow {
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub profile_picture: Option<String>,
    pub user_category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable user profile row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_profiles)]
pub(crate) struct NewUserProfileRow<'a> {
    pub user_id: &'a str,
    pub username: &'a str,
    pub email: &'a str,
    pub profile_picture: Option<&'a str>,
    pub user_category: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
