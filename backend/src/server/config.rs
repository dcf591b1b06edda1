//! HTTP server configuration object.

use std::net::SocketAddr;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;
use fun_facts_backend::inbound::http::state::HttpState;

/// Everything `create_server` needs, assembled by `main`.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) http_state: HttpState,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: PrometheusMetrics,
}

impl ServerConfig {
    #[cfg(not(feature = "metrics"))]
    #[must_use]
    pub fn new(bind_addr: SocketAddr, http_state: HttpState) -> Self {
        Self {
            bind_addr,
            http_state,
        }
    }

    /// Configuration with Prometheus middleware exposing `/metrics`.
    #[cfg(feature = "metrics")]
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        http_state: HttpState,
        prometheus: PrometheusMetrics,
    ) -> Self {
        Self {
            bind_addr,
            http_state,
            prometheus,
        }
    }
}
