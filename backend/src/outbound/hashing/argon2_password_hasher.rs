//! Argon2id implementation of the [`PasswordHasher`] port.
//!
//! Hashes are PHC strings such as `$argon2id$v=19$m=19456,t=2,p=1$...`.
//! Verification takes its parameters from the stored string, so raising the
//! work factor never locks out accounts hashed under the old one.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    self, PasswordHash as PhcHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::ports::{PasswordHasher, PasswordHasherError};
use crate::domain::{PasswordHash, PlaintextPassword, TraceId};

/// Argon2id work factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingConfig {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of passes (time cost).
    pub iterations: u32,
    /// Degree of parallelism (lanes).
    pub parallelism: u32,
}

impl HashingConfig {
    /// OWASP baseline memory cost.
    pub const DEFAULT_MEMORY_KIB: u32 = 19_456;
    /// OWASP baseline pass count.
    pub const DEFAULT_ITERATIONS: u32 = 2;
    /// OWASP baseline lane count.
    pub const DEFAULT_PARALLELISM: u32 = 1;

    /// Build a work factor from explicit values.
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Self {
        Self {
            memory_kib,
            iterations,
            parallelism,
        }
    }
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_MEMORY_KIB,
            Self::DEFAULT_ITERATIONS,
            Self::DEFAULT_PARALLELISM,
        )
    }
}

/// Rejected Argon2 parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid argon2 parameters (m={memory_kib}, t={iterations}, p={parallelism}): {message}")]
pub struct InvalidHashingConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
    pub message: String,
}

/// Argon2id password hasher with a per-call random salt.
#[derive(Debug, Clone)]
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Argon2PasswordHasher {
    /// Validate the work factor and build a hasher.
    pub fn new(config: HashingConfig) -> Result<Self, InvalidHashingConfig> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|err| InvalidHashingConfig {
            memory_kib: config.memory_kib,
            iterations: config.iterations,
            parallelism: config.parallelism,
            message: err.to_string(),
        })?;
        Ok(Self { params })
    }

    fn argon2(params: Params) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
    }
}

/// Run CPU-heavy work on the blocking pool, keeping the caller's trace id.
async fn run_blocking<T, F>(work: F) -> Result<T, PasswordHasherError>
where
    F: FnOnce() -> Result<T, PasswordHasherError> + Send + 'static,
    T: Send + 'static,
{
    let trace_id = TraceId::current();
    tokio::task::spawn_blocking(move || match trace_id {
        Some(trace_id) => TraceId::sync_scope(trace_id, work),
        None => work(),
    })
    .await
    .map_err(|err| PasswordHasherError::hashing(format!("hashing task failed: {err}")))?
}

fn hash_with(params: Params, password: &str) -> Result<PasswordHash, PasswordHasherError> {
    let salt = SaltString::generate(&mut OsRng);
    let encoded = Argon2PasswordHasher::argon2(params)
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| PasswordHasherError::hashing(err.to_string()))?
        .to_string();
    PasswordHash::new(encoded).map_err(|err| PasswordHasherError::hashing(err.to_string()))
}

fn verify_with(params: Params, candidate: &str, encoded: &str) -> Result<bool, PasswordHasherError> {
    let parsed =
        PhcHash::new(encoded).map_err(|err| PasswordHasherError::malformed_hash(err.to_string()))?;
    match Argon2PasswordHasher::argon2(params).verify_password(candidate.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(err) => Err(PasswordHasherError::malformed_hash(err.to_string())),
    }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &PlaintextPassword) -> Result<PasswordHash, PasswordHasherError> {
        let params = self.params.clone();
        let secret = Zeroizing::new(password.expose().to_owned());
        run_blocking(move || hash_with(params, &secret)).await
    }

    async fn verify(&self, candidate: &str, hash: &PasswordHash) -> Result<bool, PasswordHasherError> {
        let params = self.params.clone();
        let candidate = Zeroizing::new(candidate.to_owned());
        let encoded = hash.as_ref().to_owned();
        run_blocking(move || verify_with(params, &candidate, &encoded)).await
    }
}
