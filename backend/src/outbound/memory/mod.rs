//! Process-local user store.
//!
//! Holds every document in a vector behind a read/write lock. The email
//! uniqueness check and the write it guards happen under one write guard, so
//! concurrent creates cannot both claim the same address. Nothing survives a
//! restart.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, User, UserId};

/// In-memory [`UserRepository`] used when no database is configured.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: PoisonError<T>) -> UserPersistenceError {
    UserPersistenceError::query("user store lock poisoned")
}

fn email_taken(users: &[User], email: &EmailAddress, except: Option<&UserId>) -> bool {
    users
        .iter()
        .any(|user| user.email() == email && Some(user.id()) != except)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.clone())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.iter().find(|user| user.id() == id).cloned())
    }

    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = self.users.write().map_err(poisoned)?;
        if email_taken(&users, user.email(), None) {
            return Err(UserPersistenceError::duplicate_email(user.email().to_string()));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn replace(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = self.users.write().map_err(poisoned)?;
        if email_taken(&users, user.email(), Some(user.id())) {
            return Err(UserPersistenceError::duplicate_email(user.email().to_string()));
        }
        let slot = users
            .iter_mut()
            .find(|stored| stored.id() == user.id())
            .ok_or_else(|| UserPersistenceError::not_found(user.id().to_string()))?;
        *slot = user.clone();
        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserPersistenceError> {
        let mut users = self.users.write().map_err(poisoned)?;
        let position = users
            .iter()
            .position(|user| user.id() == id)
            .ok_or_else(|| UserPersistenceError::not_found(id.to_string()))?;
        users.remove(position);
        Ok(())
    }
}
