//! Port for turning plaintext passwords into stored credentials.

use async_trait::async_trait;

use crate::domain::{Password, PasswordCredential};

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Hashing could not be completed.
        Hashing { message: String } => "password hashing failed: {message}",
        /// A stored credential could not be parsed.
        MalformedCredential { message: String } => "stored credential is malformed: {message}",
    }
}

/// Driven port hashing and verifying passwords.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password with a fresh salt.
    async fn hash(&self, password: &Password) -> Result<PasswordCredential, PasswordHashError>;

    /// Check a plaintext password against a stored credential.
    async fn verify(
        &self,
        password: &Password,
        credential: &PasswordCredential,
    ) -> Result<bool, PasswordHashError>;
}
