//! Driving port for reading facts about a place.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ApprovalState, Error, Fact, PlaceId};

/// Fact record as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FactPayload {
    pub place_id: String,
    pub fact_id: String,
    pub submitted_by: String,
    pub created_at: DateTime<Utc>,
    pub description: String,
    pub like_count: u64,
    pub dislike_count: u64,
    pub approval_state: ApprovalState,
    pub approved_by: Option<String>,
    pub rejected_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub tags: Vec<String>,
    pub source: String,
}

impl FactPayload {
    /// Project a fact, attaching an already resolved image URL.
    pub fn from_fact(fact: &Fact, image_url: Option<String>) -> Self {
        Self {
            place_id: fact.place_id().to_string(),
            fact_id: fact.fact_id().to_string(),
            submitted_by: fact.submitted_by().to_owned(),
            created_at: fact.created_at(),
            description: fact.description().to_owned(),
            like_count: fact.like_count(),
            dislike_count: fact.dislike_count(),
            approval_state: fact.approval_state(),
            approved_by: fact.approval().approved_by().map(str::to_owned),
            rejected_by: fact.approval().rejected_by().map(str::to_owned),
            image: fact.image().map(ToString::to_string),
            image_url,
            tags: fact.tags().iter().cloned().collect(),
            source: fact.source().to_owned(),
        }
    }
}

/// Domain use-case port for listing facts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FactQuery: Send + Sync {
    /// Facts recorded for `place_id`, each with a resolved image URL.
    async fn list_by_place(&self, place_id: &PlaceId) -> Result<Vec<FactPayload>, Error>;
}
