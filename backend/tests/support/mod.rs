//! Shared helpers for HTTP integration tests.
//!
//! Provides an in-memory [`UserRepository`] that honours the same email
//! uniqueness and timestamp contracts as the Diesel adapter, and a
//! reversible [`PasswordHasher`] so flows run without PostgreSQL or Argon2
//! cost.

pub mod memory;

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use chrono::{DateTime, TimeZone, Utc};
use mockable::MockClock;
use users_api::Trace;
use users_api::domain::UserAdminService;
use users_api::inbound::http::state::HttpState;
use users_api::inbound::http::{configure_users, route_not_found};

pub use memory::{InMemoryUserRepository, PrefixHasher};

/// Fixed instant returned by the test clock.
pub fn fixture_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

/// Clock that advances one minute on every read.
pub fn ticking_clock() -> MockClock {
    let mut clock = MockClock::new();
    let mut next = fixture_now();
    clock.expect_utc().returning(move || {
        let now = next;
        next += chrono::Duration::minutes(1);
        now
    });
    clock
}

/// Build the users application over the supplied repository.
pub fn users_app(
    repository: Arc<InMemoryUserRepository>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let service = Arc::new(UserAdminService::new(
        repository,
        Arc::new(PrefixHasher),
        Arc::new(ticking_clock()),
    ));
    App::new()
        .app_data(web::Data::new(HttpState::from_service(service)))
        .wrap(Trace)
        .configure(configure_users)
        .default_service(web::to(route_not_found))
}
