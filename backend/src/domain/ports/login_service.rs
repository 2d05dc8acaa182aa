//! Driving port for login.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! check credentials without knowing which repository or hasher backs it.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, User};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the matching user.
    ///
    /// Unknown emails fail with `InvalidRequest` and wrong passwords with
    /// `NotFound`, which the HTTP adapter turns into 400 and 404.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}
