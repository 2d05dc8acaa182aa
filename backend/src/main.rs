//! Service entry-point: loads settings, bootstraps storage, and serves the
//! users API with health probes and OpenAPI docs.

mod server;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use accounts::config::AccountsSettings;
use accounts::inbound::http::health::HealthState;
use accounts::outbound::persistence::DbPool;
use server::{ServerConfig, create_server};

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

    let settings = AccountsSettings::load_from_env()?;
    let mut config = ServerConfig::new(settings.bind_addr()).with_hashing(settings.hashing());

    if let Some(pool_config) = settings.pool_config() {
        let pool = DbPool::new(pool_config)
            .await
            .map_err(|err| std::io::Error::other(err.to_string()))?;
        pool.ensure_schema()
            .await
            .map_err(|err| std::io::Error::other(err.to_string()))?;
        config = config.with_db_pool(pool);
    }

    let bind_addr = settings.bind_addr();
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "accounts service listening");
    server.await
}
