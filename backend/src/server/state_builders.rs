//! Builders selecting adapters from settings.

use std::sync::Arc;

use mockable::Clock;
use tracing::info;

use fun_facts_backend::domain::ports::{
    FactRepository, ImageResolver, PlaceRepository, UserRepository,
};
use fun_facts_backend::domain::{FactService, PlaceCatalogService, UserDirectoryService};
use fun_facts_backend::inbound::http::state::HttpState;
#[cfg(not(feature = "s3"))]
use fun_facts_backend::outbound::media::SignedUrlImageResolver;
use fun_facts_backend::outbound::memory::{
    InMemoryFactRepository, InMemoryPlaceRepository, InMemoryUserRepository,
};
use fun_facts_backend::outbound::persistence::{
    DbPool, DieselFactRepository, DieselPlaceRepository, DieselUserRepository, PoolConfig,
    run_pending_migrations,
};
use fun_facts_backend::settings::AppSettings;

/// Driven-port adapters shared by every worker.
#[derive(Clone)]
pub struct Repositories {
    pub places: Arc<dyn PlaceRepository>,
    pub facts: Arc<dyn FactRepository>,
    pub users: Arc<dyn UserRepository>,
}

/// PostgreSQL repositories when a database URL is configured, otherwise
/// process-local ones.
pub async fn build_repositories(settings: &AppSettings) -> std::io::Result<Repositories> {
    let Some(database_url) = settings.database_url() else {
        info!(adapter = "memory", "no database configured; using in-memory repositories");
        return Ok(Repositories {
            places: Arc::new(InMemoryPlaceRepository::default()),
            facts: Arc::new(InMemoryFactRepository::default()),
            users: Arc::new(InMemoryUserRepository::default()),
        });
    };

    run_pending_migrations(database_url)
        .await
        .map_err(std::io::Error::other)?;
    let max_size = settings
        .db_max_connections()
        .map_err(std::io::Error::other)?;
    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(max_size))
        .await
        .map_err(std::io::Error::other)?;
    info!(adapter = "postgres", max_size, "database pool ready");

    Ok(Repositories {
        places: Arc::new(DieselPlaceRepository::new(pool.clone())),
        facts: Arc::new(DieselFactRepository::new(pool.clone())),
        users: Arc::new(DieselUserRepository::new(pool)),
    })
}

/// Image resolver: signed URLs by default, S3 presigning with `s3`.
#[cfg(not(feature = "s3"))]
pub async fn build_image_resolver(
    settings: &AppSettings,
    clock: Arc<dyn Clock>,
) -> std::io::Result<Arc<dyn ImageResolver>> {
    let secret = settings.signing_secret().map_err(std::io::Error::other)?;
    let resolver = SignedUrlImageResolver::new(
        settings.image_base_url(),
        secret,
        settings.image_url_ttl(),
        clock,
    )
    .map_err(std::io::Error::other)?;
    Ok(Arc::new(resolver))
}

/// Image resolver: signed URLs by default, S3 presigning with `s3`.
#[cfg(feature = "s3")]
pub async fn build_image_resolver(
    settings: &AppSettings,
    _clock: Arc<dyn Clock>,
) -> std::io::Result<Arc<dyn ImageResolver>> {
    use fun_facts_backend::outbound::media::S3ImageResolver;

    let resolver =
        S3ImageResolver::from_env(settings.image_bucket(), settings.image_url_ttl()).await;
    info!(bucket = settings.image_bucket(), "resolving images via S3 presigning");
    Ok(Arc::new(resolver))
}

/// Wrap repositories in services and expose them as driving ports.
pub fn build_http_state(
    repositories: &Repositories,
    images: Arc<dyn ImageResolver>,
    clock: Arc<dyn Clock>,
    facts_approved_only: bool,
) -> HttpState {
    let facts = Arc::new(
        FactService::new(repositories.facts.clone(), images.clone(), clock.clone())
            .with_approved_only(facts_approved_only),
    );
    HttpState {
        places: Arc::new(PlaceCatalogService::new(
            repositories.places.clone(),
            images,
        )),
        facts: facts.clone(),
        fact_commands: facts,
        users: Arc::new(UserDirectoryService::new(
            repositories.users.clone(),
            clock,
        )),
    }
}
