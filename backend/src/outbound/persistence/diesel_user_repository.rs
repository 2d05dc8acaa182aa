//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{NewUserRecord, UserPersistenceError, UserRecordChanges, UserRepository};
use crate::domain::{EmailAddress, PasswordHash, User, UserId, Username};

use super::models::{NewUserRow, UserRow, UserUpdate};
use super::pool::DbPool;
use super::schema::users;
use super::user_persistence_error_mapping::{map_diesel_error, map_pool_error};

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Convert a database row into a domain user.
///
/// Rows that no longer satisfy the domain invariants surface as query
/// errors instead of being silently coerced.
fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let invalid = |err: crate::domain::UserValidationError| {
        UserPersistenceError::query(format!("invalid user row {}: {err}", row.id))
    };
    let id = UserId::new(row.id).map_err(invalid)?;
    let username = Username::new(&row.username).map_err(invalid)?;
    let email = EmailAddress::new(&row.email).map_err(invalid)?;
    let password_hash = PasswordHash::new(row.password.as_str()).map_err(invalid)?;
    Ok(User::new(id, username, email, password_hash))
}

fn changes_to_update(changes: &UserRecordChanges) -> UserUpdate<'_> {
    UserUpdate {
        username: changes.username.as_ref().map(AsRef::as_ref),
        email: changes.email.as_ref().map(AsRef::as_ref),
        password: changes.password_hash.as_ref().map(AsRef::as_ref),
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, record: &NewUserRecord) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewUserRow {
            username: record.username.as_ref(),
            email: record.email.as_ref(),
            password: record.password_hash.as_ref(),
        };

        let inserted: UserRow = diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_user(inserted)
    }

    async fn update(
        &self,
        id: UserId,
        changes: &UserRecordChanges,
    ) -> Result<Option<User>, UserPersistenceError> {
        // Diesel rejects an empty changeset, so a no-op update is a lookup.
        if changes == &UserRecordChanges::default() {
            return self.find_by_id(id).await;
        }

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated: Option<UserRow> = diesel::update(users::table.find(id.get()))
            .set(&changes_to_update(changes))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        updated.map(row_to_user).transpose()
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .order(users::id.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_user).collect()
    }

    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::delete(users::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(affected > 0)
    }
}
