//! Driving port for user read queries.
//!
//! HTTP handlers depend on this trait rather than on the credential store so
//! handler tests can substitute a mock instead of wiring persistence.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for reading users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every user, ordered by ascending id.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// One user, or a `NotFound` error.
    async fn get_user(&self, id: UserId) -> Result<User, Error>;
}
