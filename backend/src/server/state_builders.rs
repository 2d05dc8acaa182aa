//! Builders wiring the credential store to its driven adapters.

use std::sync::Arc;

use accounts::domain::CredentialStore;
use accounts::inbound::http::state::HttpState;
use accounts::outbound::hashing::Argon2PasswordHasher;
use accounts::outbound::memory::InMemoryUserRepository;
use accounts::outbound::persistence::DieselUserRepository;
use tracing::warn;

use super::ServerConfig;

/// Build handler state over PostgreSQL when a pool is configured, otherwise
/// over the in-memory repository.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the Argon2 parameters are rejected.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    let hasher = Arc::new(
        Argon2PasswordHasher::new(config.hashing).map_err(std::io::Error::other)?,
    );
    let state = match &config.db_pool {
        Some(pool) => {
            let repository = Arc::new(DieselUserRepository::new(pool.clone()));
            HttpState::from_service(Arc::new(CredentialStore::new(repository, hasher)))
        }
        None => {
            warn!("no database configured; users are kept in memory and lost on restart");
            let repository = Arc::new(InMemoryUserRepository::new());
            HttpState::from_service(Arc::new(CredentialStore::new(repository, hasher)))
        }
    };
    Ok(state)
}
