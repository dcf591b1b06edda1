//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::Trace;
use crate::domain::ports::{
    MockFactCommand, MockFactQuery, MockPlaceCatalogQuery, MockUserDirectoryCommand,
};
use crate::inbound::http::fallback::invalid_resource;
use crate::inbound::http::state::HttpState;

/// Mocked driving ports. Ports without expectations panic when called.
#[derive(Default)]
pub struct TestState {
    places: MockPlaceCatalogQuery,
    facts: MockFactQuery,
    fact_commands: MockFactCommand,
    users: MockUserDirectoryCommand,
}

impl TestState {
    pub fn with_places(mut self, places: MockPlaceCatalogQuery) -> Self {
        self.places = places;
        self
    }

    pub fn with_facts(mut self, facts: MockFactQuery) -> Self {
        self.facts = facts;
        self
    }

    pub fn with_fact_commands(mut self, fact_commands: MockFactCommand) -> Self {
        self.fact_commands = fact_commands;
        self
    }

    pub fn with_users(mut self, users: MockUserDirectoryCommand) -> Self {
        self.users = users;
        self
    }

    fn into_http_state(self) -> HttpState {
        HttpState {
            places: Arc::new(self.places),
            facts: Arc::new(self.facts),
            fact_commands: Arc::new(self.fact_commands),
            users: Arc::new(self.users),
        }
    }
}

pub fn test_state() -> TestState {
    TestState::default()
}

/// Application with the production routing table over mocked ports.
pub fn test_app(
    state: TestState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state.into_http_state()))
        .wrap(Trace)
        .configure(super::configure)
        .default_service(web::to(invalid_resource))
}
