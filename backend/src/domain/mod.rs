//! Domain primitives, ports and services.
//!
//! Purpose: define the strongly typed user account model, the ports that
//! surround it, and the credential store that enforces hashing on every
//! write. Nothing here depends on actix, Diesel or argon2.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - TraceId: per-request correlation identifier.
//! - User and its value types (UserId, Username, EmailAddress,
//!   PlaintextPassword, PasswordHash, NewUser, UserChanges).
//! - LoginCredentials: validated login input.
//! - CredentialStore: the service implementing the driving ports.

pub mod auth;
pub mod credential_store;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::credential_store::{
    CredentialStore, DUPLICATE_EMAIL_MESSAGE, INCORRECT_PASSWORD_MESSAGE, UNKNOWN_EMAIL_MESSAGE,
    USER_NOT_FOUND_MESSAGE,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EmailAddress, NewUser, PASSWORD_MIN, PasswordHash, PlaintextPassword, TEXT_COLUMN_MAX, User,
    UserChanges, UserId, UserValidationError, Username,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use accounts::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("No user found with this id!"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
