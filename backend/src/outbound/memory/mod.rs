//! In-memory repository adapters.
//!
//! Used when no database URL is configured, for local runs and by the
//! behaviour tests. State lives for the lifetime of the process and is shared
//! across workers through `Arc`.

mod fact_repository;
mod place_repository;
mod user_repository;

pub use fact_repository::InMemoryFactRepository;
pub use place_repository::InMemoryPlaceRepository;
pub use user_repository::InMemoryUserRepository;
