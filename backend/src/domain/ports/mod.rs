//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`ImageResolver`]) are implemented by
//! outbound adapters. Driving ports (`*Command`, `*Query`) are implemented by
//! domain services and consumed by inbound HTTP handlers.

mod macros;
pub(crate) use macros::define_port_error;

mod fact_command;
mod fact_query;
mod fact_repository;
mod image_resolver;
mod place_catalog_query;
mod place_repository;
mod user_directory_command;
mod user_repository;

#[cfg(test)]
pub use fact_command::MockFactCommand;
pub use fact_command::{
    FACT_SUBMITTED_MESSAGE, FactCommand, ModerateFactRequest, SubmitFactResponse,
};
#[cfg(test)]
pub use fact_query::MockFactQuery;
pub use fact_query::{FactPayload, FactQuery};
#[cfg(test)]
pub use fact_repository::MockFactRepository;
pub use fact_repository::{FactRepository, FactRepositoryError};
#[cfg(test)]
pub use image_resolver::MockImageResolver;
pub use image_resolver::{DEFAULT_IMAGE_URL_TTL_SECS, ImageResolver, ImageResolverError};
#[cfg(test)]
pub use place_catalog_query::MockPlaceCatalogQuery;
pub use place_catalog_query::{
    CoordinatesPayload, ListPlacesRequest, PlaceCatalogQuery, PlacePayload, PlacesPage,
};
#[cfg(test)]
pub use place_repository::MockPlaceRepository;
pub use place_repository::{PlaceRepository, PlaceRepositoryError};
#[cfg(test)]
pub use user_directory_command::MockUserDirectoryCommand;
pub use user_directory_command::{UpsertOutcome, UpsertUserResponse, UserDirectoryCommand};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
