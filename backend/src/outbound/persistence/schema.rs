//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match [`USERS_TABLE_DDL`](super::pool::USERS_TABLE_DDL)
//! exactly. Diesel uses them for compile-time query validation and type-safe
//! SQL generation.

diesel::table! {
    /// User accounts table.
    ///
    /// `email` carries a unique constraint; `password` only ever holds a PHC
    /// encoded hash.
    users (id) {
        /// Primary key assigned by a `SERIAL` sequence.
        id -> Int4,
        /// Account username (max 255 characters).
        username -> Varchar,
        /// Unique email address (max 255 characters).
        email -> Varchar,
        /// Salted password hash.
        password -> Varchar,
    }
}
