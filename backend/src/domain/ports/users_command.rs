//! Driving port for creating, updating and deleting users.

use async_trait::async_trait;

use crate::domain::{Error, NewUser, User, UserId, UserPatch};

/// Use-case port consumed by inbound adapters to mutate users.
///
/// Errors use [`crate::domain::ErrorCode::InvalidRequest`] for constraint
/// violations, [`crate::domain::ErrorCode::NotFound`] for unknown ids and
/// [`crate::domain::ErrorCode::InternalError`] for store failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Create a user, assigning its identifier and creation time.
    async fn create_user(&self, draft: NewUser) -> Result<User, Error>;

    /// Apply a patch to an existing user.
    async fn update_user(&self, id: &UserId, patch: UserPatch) -> Result<User, Error>;

    /// Delete a user permanently.
    async fn delete_user(&self, id: &UserId) -> Result<(), Error>;
}
