//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel rows and domain
//! entities. Connections come from a `bb8` pool through `diesel-async`, and
//! every database failure is mapped onto the owning port's error enum.
//!
//! # Example
//!
//! ```ignore
//! use fun_facts_backend::outbound::persistence::{DbPool, DieselFactRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/funfacts")).await?;
//! let repo = DieselFactRepository::new(pool);
//! ```

mod diesel_fact_repository;
mod diesel_place_repository;
mod diesel_user_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_fact_repository::DieselFactRepository;
pub use diesel_place_repository::DieselPlaceRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
