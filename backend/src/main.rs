//! Backend entry-point: loads configuration, prepares the database, and
//! serves the users REST API.

mod server;

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use users_api::domain::UserAdminService;
use users_api::inbound::http::health::HealthState;
use users_api::inbound::http::state::HttpState;
use users_api::middleware::with_trace;
use users_api::outbound::persistence::{DbPool, DieselUserRepository, run_pending_migrations};
use users_api::outbound::security::Argon2PasswordHasher;
use users_api::settings::ServerSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load configuration: {e}")))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| std::io::Error::other(format!("invalid listen address: {e}")))?;

    let database_url = settings.database_url();
    if settings.run_migrations() {
        with_trace(run_pending_migrations(&database_url))
            .await
            .map_err(std::io::Error::other)?;
    }

    let pool = DbPool::new(settings.pool_config())
        .await
        .map_err(std::io::Error::other)?;

    let service = Arc::new(UserAdminService::new(
        Arc::new(DieselUserRepository::new(pool)),
        Arc::new(Argon2PasswordHasher::default()),
        Arc::new(DefaultClock),
    ));
    let http_state = HttpState::from_service(service);

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, ServerConfig::new(bind_addr, http_state))?;
    info!(%bind_addr, "users API listening");
    server.await
}
