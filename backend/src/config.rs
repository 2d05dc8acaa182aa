//! Service settings loaded via OrthoConfig.
//!
//! Values layer defaults, an optional config file, `ACCOUNTS_*` environment
//! variables and command-line flags, in increasing precedence.

use std::ffi::OsString;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::hashing::HashingConfig;
use crate::outbound::persistence::PoolConfig;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Runtime settings for the accounts service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ACCOUNTS")]
pub struct AccountsSettings {
    /// PostgreSQL connection URL; the in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Listen address.
    pub host: Option<IpAddr>,
    /// Listen port.
    pub port: Option<u16>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Argon2 memory cost in KiB.
    pub hash_memory_kib: Option<u32>,
    /// Argon2 pass count.
    pub hash_iterations: Option<u32>,
    /// Argon2 lane count.
    pub hash_parallelism: Option<u32>,
}

impl AccountsSettings {
    /// Load settings from the process environment and arguments.
    ///
    /// # Errors
    ///
    /// Returns [`std::io::Error`] when a layer fails to parse.
    pub fn load_from_env() -> std::io::Result<Self> {
        Self::load_from_args(std::env::args_os())
    }

    /// Load settings from an explicit argument list.
    ///
    /// # Errors
    ///
    /// Returns [`std::io::Error`] when a layer fails to parse.
    pub fn load_from_args<I, T>(args: I) -> std::io::Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::load_from_iter(args)
            .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))
    }

    /// Socket address the HTTP server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Pool settings, or `None` when no database URL is configured.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        self.database_url.as_deref().map(|url| {
            PoolConfig::new(url)
                .with_max_size(self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS))
        })
    }

    /// Argon2 work factor with unset fields at their defaults.
    pub fn hashing(&self) -> HashingConfig {
        HashingConfig::new(
            self.hash_memory_kib
                .unwrap_or(HashingConfig::DEFAULT_MEMORY_KIB),
            self.hash_iterations
                .unwrap_or(HashingConfig::DEFAULT_ITERATIONS),
            self.hash_parallelism
                .unwrap_or(HashingConfig::DEFAULT_PARALLELISM),
        )
    }
}
