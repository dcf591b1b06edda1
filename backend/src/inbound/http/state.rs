//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and depend only on driving ports, so
//! they can be exercised against mocks or in-memory adapters without I/O.

use std::sync::Arc;

use crate::domain::ports::{FactCommand, FactQuery, PlaceCatalogQuery, UserDirectoryCommand};

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use fun_facts_backend::domain::{FactService, PlaceCatalogService, UserDirectoryService};
/// use fun_facts_backend::inbound::http::state::HttpState;
/// use fun_facts_backend::outbound::media::{SignedUrlImageResolver, SigningSecret};
/// use fun_facts_backend::outbound::memory::{
///     InMemoryFactRepository, InMemoryPlaceRepository, InMemoryUserRepository,
/// };
/// use mockable::DefaultClock;
///
/// let clock = Arc::new(DefaultClock);
/// let images = Arc::new(
///     SignedUrlImageResolver::new(
///         "http://localhost:8080/images",
///         SigningSecret::generate(),
///         std::time::Duration::from_secs(3600),
///         clock.clone(),
///     )
///     .expect("valid resolver"),
/// );
/// let facts = Arc::new(FactService::new(
///     Arc::new(InMemoryFactRepository::default()),
///     images.clone(),
///     clock.clone(),
/// ));
/// let state = HttpState {
///     places: Arc::new(PlaceCatalogService::new(
///         Arc::new(InMemoryPlaceRepository::default()),
///         images,
///     )),
///     facts: facts.clone(),
///     fact_commands: facts,
///     users: Arc::new(UserDirectoryService::new(
///         Arc::new(InMemoryUserRepository::default()),
///         clock,
///     )),
/// };
/// let _places = state.places.clone();
/// ```
#[derive(Clone)]
pub struct HttpState {
    pub places: Arc<dyn PlaceCatalogQuery>,
    pub facts: Arc<dyn FactQuery>,
    pub fact_commands: Arc<dyn FactCommand>,
    pub users: Arc<dyn UserDirectoryCommand>,
}
