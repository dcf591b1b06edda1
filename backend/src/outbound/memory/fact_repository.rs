//! In-memory fact store preserving insertion order.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{FactRepository, FactRepositoryError};
use crate::domain::{Approval, Fact, FactId, PlaceId};

/// Fact repository backed by a vector in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryFactRepository {
    facts: RwLock<Vec<Fact>>,
}

fn same_identity(fact: &Fact, place_id: &PlaceId, fact_id: &FactId) -> bool {
    fact.place_id() == place_id && fact.fact_id() == fact_id
}

#[async_trait]
impl FactRepository for InMemoryFactRepository {
    async fn insert(&self, fact: &Fact) -> Result<(), FactRepositoryError> {
        let mut facts = self.facts.write().await;
        if facts
            .iter()
            .any(|stored| same_identity(stored, fact.place_id(), fact.fact_id()))
        {
            return Err(FactRepositoryError::duplicate(fact.fact_id().as_str()));
        }
        facts.push(fact.clone());
        Ok(())
    }

    async fn list_by_place(&self, place_id: &PlaceId) -> Result<Vec<Fact>, FactRepositoryError> {
        let facts = self.facts.read().await;
        Ok(facts
            .iter()
            .filter(|fact| fact.place_id() == place_id)
            .cloned()
            .collect())
    }

    async fn find(
        &self,
        place_id: &PlaceId,
        fact_id: &FactId,
    ) -> Result<Option<Fact>, FactRepositoryError> {
        let facts = self.facts.read().await;
        Ok(facts
            .iter()
            .find(|fact| same_identity(fact, place_id, fact_id))
            .cloned())
    }

    async fn apply_moderation(
        &self,
        place_id: &PlaceId,
        fact_id: &FactId,
        approval: &Approval,
    ) -> Result<bool, FactRepositoryError> {
        let Some((decision, moderator)) = approval.decision() else {
            return Ok(false);
        };
        let mut facts = self.facts.write().await;
        let Some(slot) = facts
            .iter_mut()
            .find(|fact| same_identity(fact, place_id, fact_id))
        else {
            return Ok(false);
        };
        match slot.clone().moderate(decision, moderator.to_owned()) {
            Ok(moderated) => {
                *slot = moderated;
                Ok(true)
            }
            Err(_) => Ok(false),
        }
    }
}
