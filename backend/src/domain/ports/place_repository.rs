//! Port abstraction for place catalogue storage.

use async_trait::async_trait;

use crate::domain::{Place, PlaceId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by place repository adapters.
    pub enum PlaceRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "place repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "place repository query failed: {message}",
    }
}

/// Read and bulk-write access to the place catalogue.
///
/// Listing is keyset-ordered by place id so cursor pagination is stable
/// across pages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlaceRepository: Send + Sync {
    /// Return up to `limit` places whose id sorts strictly after `after`.
    async fn list(
        &self,
        after: Option<PlaceId>,
        limit: usize,
    ) -> Result<Vec<Place>, PlaceRepositoryError>;

    /// Insert or replace places by id, returning the number written.
    async fn upsert_batch(&self, places: &[Place]) -> Result<usize, PlaceRepositoryError>;
}
