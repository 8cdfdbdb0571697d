//! Driving port for user-facing queries.
//!
//! Inbound adapters (HTTP handlers) use this port to read users without
//! importing outbound persistence concerns.

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Domain use-case port for reading users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every user, most recently created first.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// A single user by identifier.
    ///
    /// Fails with an invalid-identifier error before any lookup when `id`
    /// is not a hyphenated UUID.
    async fn get_user(&self, id: &str) -> Result<User, Error>;
}
