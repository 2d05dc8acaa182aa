//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{LoginService, UsersCommand, UsersQuery};

/// Parameter object bundling the port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub users: Arc<dyn UsersQuery>,
    pub users_command: Arc<dyn UsersCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub users: Arc<dyn UsersQuery>,
    pub users_command: Arc<dyn UsersCommand>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            users,
            users_command,
        } = ports;
        Self {
            login,
            users,
            users_command,
        }
    }

    /// Construct state where one service backs every port.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use accounts::domain::CredentialStore;
    /// use accounts::inbound::http::state::HttpState;
    /// use accounts::outbound::hashing::{Argon2PasswordHasher, HashingConfig};
    /// use accounts::outbound::memory::InMemoryUserRepository;
    ///
    /// let hasher = Argon2PasswordHasher::new(HashingConfig::default()).expect("valid params");
    /// let store = CredentialStore::new(Arc::new(InMemoryUserRepository::new()), Arc::new(hasher));
    /// let state = HttpState::from_service(Arc::new(store));
    /// let _users = state.users.clone();
    /// ```
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: LoginService + UsersQuery + UsersCommand + 'static,
    {
        Self {
            login: service.clone(),
            users: service.clone(),
            users_command: service,
        }
    }
}
