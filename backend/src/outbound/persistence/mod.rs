//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories are backed by `diesel-async` connections from a `bb8` pool.
//! Diesel row structs (`models.rs`) and table definitions (`schema.rs`) are
//! internal; only domain types cross the port boundary, and every Diesel or
//! pool failure is mapped to [`UserPersistenceError`](crate::domain::ports::UserPersistenceError).
//!
//! # Example
//!
//! ```no_run
//! use accounts::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), accounts::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/accounts")).await?;
//! pool.ensure_schema().await?;
//! let repository = DieselUserRepository::new(pool);
//! # let _ = repository;
//! # Ok(())
//! # }
//! ```

mod diesel_user_repository;
mod models;
mod pool;
mod schema;
mod user_persistence_error_mapping;

pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError, USERS_TABLE_DDL};
