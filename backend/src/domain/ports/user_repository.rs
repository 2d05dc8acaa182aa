//! Driven port for user account persistence.
//!
//! Repositories never see plaintext passwords: the credential store hashes
//! before building a [`NewUserRecord`] or [`UserRecordChanges`].

use async_trait::async_trait;

use crate::domain::{EmailAddress, PasswordHash, User, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The email column's uniqueness constraint rejected the write.
        DuplicateEmail => "email address already in use",
    }
}

/// Row to insert; the store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserRecord {
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: PasswordHash,
}

/// Partial row update; `None` leaves the column unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserRecordChanges {
    pub username: Option<Username>,
    pub email: Option<EmailAddress>,
    pub password_hash: Option<PasswordHash>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return it with its assigned id.
    async fn insert(&self, record: &NewUserRecord) -> Result<User, UserPersistenceError>;

    /// Apply `changes` to the user; `None` if the id is unknown.
    async fn update(
        &self,
        id: UserId,
        changes: &UserRecordChanges,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by exact, case-sensitive email match.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError>;

    /// Every user, ordered by ascending id.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Remove a user; `false` if nothing matched.
    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError>;
}
