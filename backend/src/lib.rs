//! Fun Facts content service.
//!
//! Hexagonal layout: `domain` holds entities, ports and services;
//! `inbound::http` adapts Actix requests onto the driving ports; `outbound`
//! implements the driven ports over memory, PostgreSQL and media backends.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod seeding;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
