//! User use-cases over the record store.
//!
//! `UserService` implements the driving ports by delegating to a
//! [`UserRepository`]. It assigns identifiers and creation timestamps and
//! folds every store failure into the domain error taxonomy, so adapters
//! never see a raw persistence error.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, error, info};

use crate::domain::ports::{UserPersistenceError, UserRepository, UsersCommand, UsersQuery};
use crate::domain::{Error, ErrorCode, NewUser, User, UserId, UserPatch};

/// Domain service backing the user CRUD contract.
#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
}

impl UserService {
    /// Create a service over `repository`, stamping new users with `clock`.
    pub fn new(repository: Arc<dyn UserRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}

pub(crate) fn map_persistence_error(error: UserPersistenceError) -> Error {
    let kind = error.kind();
    match error {
        UserPersistenceError::DuplicateEmail { email } => {
            Error::invalid_request(format!("email {email} is already in use"))
                .with_details(json!({ "field": "email", "code": "duplicate_email" }))
        }
        UserPersistenceError::NotFound { id } => Error::not_found(format!("user {id} not found")),
        UserPersistenceError::Connection { message } | UserPersistenceError::Query { message } => {
            error!(kind, %message, "user store operation failed");
            Error::try_new(ErrorCode::InternalError, message)
                .unwrap_or_else(|_| Error::internal("Internal server error"))
        }
    }
}

fn not_found(id: &UserId) -> Error {
    Error::not_found(format!("user {id} not found"))
}

#[async_trait]
impl UsersQuery for UserService {
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        let users = self
            .repository
            .list_all()
            .await
            .map_err(map_persistence_error)?;
        debug!(count = users.len(), "listed users");
        Ok(users)
    }
}

#[async_trait]
impl UsersCommand for UserService {
    async fn create_user(&self, draft: NewUser) -> Result<User, Error> {
        let user = User::create(UserId::random(), draft, self.clock.utc());
        self.repository
            .insert(&user)
            .await
            .map_err(map_persistence_error)?;
        info!(user_id = %user.id(), role = %user.role(), "user created");
        Ok(user)
    }

    async fn update_user(&self, id: &UserId, patch: UserPatch) -> Result<User, Error> {
        let current = self
            .repository
            .find_by_id(id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| not_found(id))?;
        if patch.is_empty() {
            return Ok(current);
        }

        let updated = current.apply(patch);
        self.repository
            .replace(&updated)
            .await
            .map_err(map_persistence_error)?;
        info!(user_id = %id, "user updated");
        Ok(updated)
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), Error> {
        self.repository
            .delete(id)
            .await
            .map_err(map_persistence_error)?;
        info!(user_id = %id, "user deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
