//! Backend entry-point: loads settings, selects adapters and serves HTTP.

mod server;

use std::sync::Arc;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetricsBuilder;
use mockable::{Clock, DefaultClock};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use fun_facts_backend::inbound::http::health::HealthState;
use fun_facts_backend::seeding::seed_places_on_startup;
use fun_facts_backend::settings::AppSettings;
use server::{
    ServerConfig, build_http_state, build_image_resolver, build_repositories, create_server,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|e| std::io::Error::other(e.to_string()))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);

    let repositories = build_repositories(&settings).await?;
    seed_places_on_startup(
        settings.places_seed_path.as_deref(),
        repositories.places.clone(),
    )
    .await
    .map_err(std::io::Error::other)?;

    let images = build_image_resolver(&settings, clock.clone()).await?;
    let http_state = build_http_state(
        &repositories,
        images,
        clock,
        settings.facts_approved_only,
    );

    #[cfg(not(feature = "metrics"))]
    let config = ServerConfig::new(bind_addr, http_state);
    #[cfg(feature = "metrics")]
    let config = ServerConfig::new(bind_addr, http_state, make_metrics()?);

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "listening");
    server.await
}

#[cfg(feature = "metrics")]
fn make_metrics() -> std::io::Result<actix_web_prom::PrometheusMetrics> {
    PrometheusMetricsBuilder::new("fun_facts")
        .endpoint("/metrics")
        .build()
        .map_err(|e| std::io::Error::other(format!("configure Prometheus metrics: {e}")))
}
