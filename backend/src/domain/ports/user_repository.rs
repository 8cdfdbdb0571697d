//! Port abstraction for user persistence adapters and their errors.
//!
//! Adapters must treat the email column as unique and report violations of
//! that constraint as [`UserPersistenceError::DuplicateEmail`] so concurrent
//! creates with the same address surface as conflicts rather than generic
//! failures.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{EmailAddress, PasswordCredential, User, UserChanges, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The email uniqueness constraint rejected the write.
        DuplicateEmail { email: String } => "email already registered: {email}",
    }
}

/// Driven port for the persisted users table.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new record and return it as stored.
    async fn insert(
        &self,
        user: &User,
        credential: &PasswordCredential,
    ) -> Result<User, UserPersistenceError>;

    /// All records, most recently created first.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch a record by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Identifier of the record holding `email`, if any.
    async fn find_id_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserId>, UserPersistenceError>;

    /// Apply the present fields of `changes` and stamp `updated_at`.
    ///
    /// Returns `None` when no record matches `id`. Adapters never store an
    /// `updated_at` earlier than the record's `created_at`.
    async fn update(
        &self,
        id: &UserId,
        changes: &UserChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Remove a record, returning it when it existed.
    async fn delete(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;
}
