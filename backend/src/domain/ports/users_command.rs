//! Driving port for user mutations.

use async_trait::async_trait;

use crate::domain::{Error, NewUser, User, UserChanges, UserId};

/// Domain use-case port for creating, updating and deleting users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Create an account, hashing its password first.
    async fn create_user(&self, new_user: NewUser) -> Result<User, Error>;

    /// Apply a partial update and return the stored result.
    async fn update_user(&self, id: UserId, changes: UserChanges) -> Result<User, Error>;

    /// Delete an account, or fail with `NotFound`.
    async fn delete_user(&self, id: UserId) -> Result<(), Error>;
}
