//! Driving port for reading users.

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Use-case port consumed by inbound adapters to list users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// All users in creation order.
    async fn list_users(&self) -> Result<Vec<User>, Error>;
}
