//! Driven port for one-way password hashing.

use async_trait::async_trait;

use crate::domain::{PasswordHash, PlaintextPassword};

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHasherError {
        /// Deriving a hash failed.
        Hashing { message: String } => "password hashing failed: {message}",
        /// A stored hash could not be parsed.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

/// Salted, tunable password hashing.
///
/// Implementations generate a fresh salt per call, so hashing the same
/// password twice yields different encodings that both verify.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Derive a salted hash of `password`.
    async fn hash(&self, password: &PlaintextPassword) -> Result<PasswordHash, PasswordHasherError>;

    /// Check a candidate against a stored hash.
    ///
    /// A mismatch is `Ok(false)`; `Err` is reserved for hashes that cannot be
    /// processed at all.
    async fn verify(&self, candidate: &str, hash: &PasswordHash) -> Result<bool, PasswordHasherError>;
}
