//! Process-local `UserRepository` used when no database is configured.
//!
//! Mirrors the PostgreSQL adapter's observable behaviour: ids come from a
//! monotonically increasing sequence starting at 1 and are never reused,
//! email uniqueness is enforced case-sensitively, and listings are ordered
//! by ascending id.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::ports::{NewUserRecord, UserPersistenceError, UserRecordChanges, UserRepository};
use crate::domain::{User, UserId};

#[derive(Debug)]
struct Table {
    next_id: i32,
    rows: BTreeMap<UserId, User>,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

impl Table {
    fn email_taken(&self, email: &str, except: Option<UserId>) -> bool {
        self.rows
            .values()
            .any(|user| user.email().as_ref() == email && Some(user.id()) != except)
    }
}

/// In-memory implementation of the [`UserRepository`] port.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    table: RwLock<Table>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Table>, UserPersistenceError> {
        self.table
            .read()
            .map_err(|_| UserPersistenceError::query("in-memory user table lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Table>, UserPersistenceError> {
        self.table
            .write()
            .map_err(|_| UserPersistenceError::query("in-memory user table lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, record: &NewUserRecord) -> Result<User, UserPersistenceError> {
        let mut table = self.write()?;
        if table.email_taken(record.email.as_ref(), None) {
            return Err(UserPersistenceError::duplicate_email());
        }
        let id = UserId::new(table.next_id)
            .map_err(|err| UserPersistenceError::query(format!("id sequence exhausted: {err}")))?;
        table.next_id = table
            .next_id
            .checked_add(1)
            .ok_or_else(|| UserPersistenceError::query("id sequence exhausted"))?;
        let user = User::new(
            id,
            record.username.clone(),
            record.email.clone(),
            record.password_hash.clone(),
        );
        table.rows.insert(id, user.clone());
        Ok(user)
    }

    async fn update(
        &self,
        id: UserId,
        changes: &UserRecordChanges,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut table = self.write()?;
        if let Some(email) = &changes.email {
            if table.rows.contains_key(&id) && table.email_taken(email.as_ref(), Some(id)) {
                return Err(UserPersistenceError::duplicate_email());
            }
        }
        let Some(current) = table.rows.get_mut(&id) else {
            return Ok(None);
        };
        let updated = User::new(
            id,
            changes
                .username
                .clone()
                .unwrap_or_else(|| current.username().clone()),
            changes
                .email
                .clone()
                .unwrap_or_else(|| current.email().clone()),
            changes
                .password_hash
                .clone()
                .unwrap_or_else(|| current.password_hash().clone()),
        );
        *current = updated.clone();
        Ok(Some(updated))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.read()?.rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .read()?
            .rows
            .values()
            .find(|user| user.email().as_ref() == email)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.read()?.rows.values().cloned().collect())
    }

    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        Ok(self.write()?.rows.remove(&id).is_some())
    }
}
