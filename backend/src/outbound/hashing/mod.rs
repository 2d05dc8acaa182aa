//! Password hashing adapters.

mod argon2_password_hasher;

pub use argon2_password_hasher::{Argon2PasswordHasher, HashingConfig, InvalidHashingConfig};
