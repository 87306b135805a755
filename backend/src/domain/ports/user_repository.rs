//! Driven port for the user record store and its errors.

use async_trait::async_trait;

use crate::domain::{User, UserId};

use super::define_port_error;

define_port_error! {
    /// Failures raised by user store adapters.
    pub enum UserPersistenceError {
        /// The store could not be reached.
        Connection { message: String } => "user store connection failed: {message}",
        /// A query or mutation failed during execution.
        Query { message: String } => "user store query failed: {message}",
        /// Another user already holds the email address.
        DuplicateEmail { email: String } => "email {email} is already in use",
        /// No user exists with the identifier.
        NotFound { id: String } => "user {id} not found",
    }
}

/// Persistent collection of user documents.
///
/// Mutations are atomic: the uniqueness check on email and the write it
/// guards are never observed apart.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Every stored user in creation order.
    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Store a new user.
    ///
    /// Fails with [`UserPersistenceError::DuplicateEmail`] when any stored
    /// user holds the same email.
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Replace the stored document with the same identifier.
    ///
    /// Fails with [`UserPersistenceError::NotFound`] when absent and with
    /// [`UserPersistenceError::DuplicateEmail`] when a different user holds
    /// the email.
    async fn replace(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Remove a user permanently.
    async fn delete(&self, id: &UserId) -> Result<(), UserPersistenceError>;
}
