//! Credential store: the single write path for user accounts.
//!
//! Every mutation that carries a password hashes it inside the same call, so
//! a repository never receives plaintext. The store implements the driving
//! ports consumed by the HTTP adapter.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    LoginService, NewUserRecord, PasswordHasher, PasswordHasherError, UserPersistenceError,
    UserRecordChanges, UserRepository, UsersCommand, UsersQuery,
};
use crate::domain::{
    Error, LoginCredentials, NewUser, PasswordHash, PlaintextPassword, User, UserChanges, UserId,
};

/// Message returned when an id matches no account.
pub const USER_NOT_FOUND_MESSAGE: &str = "No user found with this id!";
/// Message returned when a create or update collides on email.
pub const DUPLICATE_EMAIL_MESSAGE: &str = "Email address already in use!";
/// Message returned when login names an unknown email.
pub const UNKNOWN_EMAIL_MESSAGE: &str = "No user with that email address!";
/// Message returned when the login password does not match.
pub const INCORRECT_PASSWORD_MESSAGE: &str = "Incorrect password!";

/// User account service over a repository and a password hasher.
pub struct CredentialStore<R, H> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> Clone for CredentialStore<R, H> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            hasher: Arc::clone(&self.hasher),
        }
    }
}

impl<R, H> CredentialStore<R, H> {
    /// Create a store over the given adapters.
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }
}

impl<R, H> CredentialStore<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    fn map_persistence_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                debug!(%message, "user repository connection failed");
                Error::service_unavailable("user store unavailable")
            }
            UserPersistenceError::Query { message } => {
                debug!(%message, "user repository query failed");
                Error::internal(format!("user repository error: {message}"))
            }
            UserPersistenceError::DuplicateEmail => Error::conflict(DUPLICATE_EMAIL_MESSAGE)
                .with_details(serde_json::json!({ "field": "email", "code": "duplicate_email" })),
        }
    }

    fn map_hasher_error(error: PasswordHasherError) -> Error {
        Error::internal(format!("password hasher error: {error}"))
    }

    fn not_found() -> Error {
        Error::not_found(USER_NOT_FOUND_MESSAGE)
    }

    async fn hash(&self, password: &PlaintextPassword) -> Result<PasswordHash, Error> {
        self.hasher
            .hash(password)
            .await
            .map_err(Self::map_hasher_error)
    }

    /// Hash the password and insert the account.
    ///
    /// A duplicate email yields a `Conflict` error and nothing is inserted.
    pub async fn create(&self, new_user: NewUser) -> Result<User, Error> {
        let NewUser {
            username,
            email,
            password,
        } = new_user;
        let password_hash = self.hash(&password).await?;
        let record = NewUserRecord {
            username,
            email,
            password_hash,
        };
        let user = self
            .repository
            .insert(&record)
            .await
            .map_err(Self::map_persistence_error)?;
        info!(user_id = %user.id(), "user created");
        Ok(user)
    }

    /// Apply a partial update, re-hashing a supplied password.
    ///
    /// Unknown ids are rejected before any password is hashed.
    pub async fn update(&self, id: UserId, changes: UserChanges) -> Result<User, Error> {
        if changes.is_empty() {
            return Err(Error::invalid_request("no fields to update")
                .with_details(serde_json::json!({ "field": "body", "code": "no_changes" })));
        }
        if self.find_by_id(id).await?.is_none() {
            return Err(Self::not_found());
        }
        let UserChanges {
            username,
            email,
            password,
        } = changes;
        let password_hash = match password {
            Some(password) => Some(self.hash(&password).await?),
            None => None,
        };
        let record = UserRecordChanges {
            username,
            email,
            password_hash,
        };
        let user = self
            .repository
            .update(id, &record)
            .await
            .map_err(Self::map_persistence_error)?
            .ok_or_else(Self::not_found)?;
        info!(user_id = %id, "user updated");
        Ok(user)
    }

    /// Look up an account by id.
    pub async fn find_by_id(&self, id: UserId) -> Result<Option<User>, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(Self::map_persistence_error)
    }

    /// Look up an account by exact email match.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        self.repository
            .find_by_email(email)
            .await
            .map_err(Self::map_persistence_error)
    }

    /// Every account, ordered by ascending id.
    pub async fn find_all(&self) -> Result<Vec<User>, Error> {
        self.repository
            .list()
            .await
            .map_err(Self::map_persistence_error)
    }

    /// Remove an account; `false` if the id matched nothing.
    pub async fn delete(&self, id: UserId) -> Result<bool, Error> {
        let deleted = self
            .repository
            .delete(id)
            .await
            .map_err(Self::map_persistence_error)?;
        if deleted {
            info!(user_id = %id, "user deleted");
        }
        Ok(deleted)
    }

    /// Compare a candidate password against the user's stored hash.
    pub async fn verify_password(&self, user: &User, candidate: &str) -> Result<bool, Error> {
        self.hasher
            .verify(candidate, user.password_hash())
            .await
            .map_err(Self::map_hasher_error)
    }

    /// Look up the account by email, then verify the password.
    pub async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let Some(user) = self.find_by_email(credentials.email()).await? else {
            warn!("login rejected: unknown email");
            return Err(Error::invalid_request(UNKNOWN_EMAIL_MESSAGE));
        };
        if !self.verify_password(&user, credentials.password()).await? {
            warn!(user_id = %user.id(), "login rejected: incorrect password");
            return Err(Error::not_found(INCORRECT_PASSWORD_MESSAGE));
        }
        info!(user_id = %user.id(), "user logged in");
        Ok(user)
    }
}

#[async_trait]
impl<R, H> UsersQuery for CredentialStore<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.find_all().await
    }

    async fn get_user(&self, id: UserId) -> Result<User, Error> {
        self.find_by_id(id).await?.ok_or_else(Self::not_found)
    }
}

#[async_trait]
impl<R, H> UsersCommand for CredentialStore<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn create_user(&self, new_user: NewUser) -> Result<User, Error> {
        self.create(new_user).await
    }

    async fn update_user(&self, id: UserId, changes: UserChanges) -> Result<User, Error> {
        self.update(id, changes).await
    }

    async fn delete_user(&self, id: UserId) -> Result<(), Error> {
        if self.delete(id).await? {
            Ok(())
        } else {
            Err(Self::not_found())
        }
    }
}

#[async_trait]
impl<R, H> LoginService for CredentialStore<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        CredentialStore::authenticate(self, credentials).await
    }
}
