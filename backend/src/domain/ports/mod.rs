//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`UsersQuery`, `UsersCommand`, `LoginService`) are what
//! inbound adapters call. Driven ports (`UserRepository`, `PasswordHasher`)
//! are what outbound adapters implement.

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod password_hasher;
mod user_repository;
mod users_command;
mod users_query;

#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{
    NewUserRecord, UserPersistenceError, UserRecordChanges, UserRepository,
};
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::UsersCommand;
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
