//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repository using Diesel ORM
//! - **hashing**: Argon2id password hasher
//! - **memory**: process-local repository used without a database
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod hashing;
pub mod memory;
pub mod persistence;
