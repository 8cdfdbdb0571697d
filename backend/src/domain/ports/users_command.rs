//! Driving port for user mutations.
//!
//! Inbound adapters hand raw, unvalidated input to this port; validation,
//! identifier shape checks, uniqueness, and persistence all happen behind
//! it so every transport gets the same lifecycle rules.

use async_trait::async_trait;

use crate::domain::{Error, NewUserFields, User, UserFieldChanges};

/// Domain use-case port for creating, updating, and deleting users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Validate and persist a new user.
    async fn create(&self, fields: NewUserFields) -> Result<User, Error>;

    /// Apply a partial update to the user identified by `id`.
    async fn update(&self, id: &str, changes: UserFieldChanges) -> Result<User, Error>;

    /// Permanently delete the user identified by `id`, returning its data.
    async fn delete(&self, id: &str) -> Result<User, Error>;
}
