//! HTTP inbound adapter exposing the REST endpoints.
//!
//! Each path is registered as a resource whose default service is the
//! invalid-resource fallback, so a known path with an unsupported method
//! answers the same fixed 404 as an unknown path.

pub mod error;
pub mod facts;
pub mod fallback;
pub mod health;
pub mod places;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

use error::{json_error_handler, path_error_handler, query_error_handler};
use fallback::invalid_resource;

/// Register extractor configuration and every content route.
///
/// Health probes are registered separately because they depend on the
/// server's `HealthState`. Callers should also install
/// [`fallback::invalid_resource`] as the application default service.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use fun_facts_backend::inbound::http::{configure, fallback::invalid_resource};
///
/// let app = App::new()
///     .configure(configure)
///     .default_service(web::to(invalid_resource));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(
            web::resource("/")
                .route(web::post().to(facts::submit_fact))
                .default_service(web::to(invalid_resource)),
        )
        .service(
            web::resource("/places")
                .route(web::get().to(places::list_places))
                .default_service(web::to(invalid_resource)),
        )
        .service(
            web::resource("/facts")
                .route(web::get().to(facts::list_facts))
                .default_service(web::to(invalid_resource)),
        )
        .service(
            web::resource("/facts/{placeId}/{factId}/moderation")
                .route(web::post().to(facts::moderate_fact))
                .default_service(web::to(invalid_resource)),
        )
        .service(
            web::resource("/users")
                .route(web::post().to(users::upsert_user))
                .default_service(web::to(invalid_resource)),
        );
}
