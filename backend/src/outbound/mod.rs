//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **memory**: process-local repositories used by default and in tests
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **media**: image URL resolvers (signed URLs, optional S3 presigning)
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod media;
pub mod memory;
pub mod persistence;
