//! Port abstraction for fact storage.

use async_trait::async_trait;

use crate::domain::{Approval, Fact, FactId, PlaceId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by fact repository adapters.
    pub enum FactRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "fact repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "fact repository query failed: {message}",
        /// A fact with the same `(placeId, factId)` already exists.
        Duplicate { fact_id: String } => "fact {fact_id} already exists",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FactRepository: Send + Sync {
    /// Store a new fact.
    async fn insert(&self, fact: &Fact) -> Result<(), FactRepositoryError>;

    /// All facts for a place in storage order.
    async fn list_by_place(&self, place_id: &PlaceId) -> Result<Vec<Fact>, FactRepositoryError>;

    /// Fetch one fact by its identity.
    async fn find(
        &self,
        place_id: &PlaceId,
        fact_id: &FactId,
    ) -> Result<Option<Fact>, FactRepositoryError>;

    /// Persist a moderation outcome only if the stored fact is still pending.
    ///
    /// Returns `false` when the fact was no longer pending (or vanished), so
    /// concurrent moderations cannot both succeed.
    async fn apply_moderation(
        &self,
        place_id: &PlaceId,
        fact_id: &FactId,
        approval: &Approval,
    ) -> Result<bool, FactRepositoryError>;
}
