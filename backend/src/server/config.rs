//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use accounts::outbound::hashing::HashingConfig;
use accounts::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) hashing: HashingConfig,
}

impl ServerConfig {
    /// Configuration backed by the in-memory store and default hashing cost.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            hashing: HashingConfig::default(),
        }
    }

    /// Attach a database connection pool; users are then stored in PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Override the Argon2 work factor.
    #[must_use]
    pub fn with_hashing(mut self, hashing: HashingConfig) -> Self {
        self.hashing = hashing;
        self
    }
}
