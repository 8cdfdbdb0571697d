//! Argon2id implementation of the `PasswordHasher` port.
//!
//! Hashes use the OWASP recommended cost (19456 KiB memory, 2 iterations,
//! parallelism 1) with a fresh random salt each time and are stored as PHC
//! strings, so the parameters travel with the hash.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    Error as PhcError, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;

use crate::domain::ports::{PasswordHashError, PasswordHasher};
use crate::domain::{Password, PasswordCredential};

/// OWASP memory cost in KiB.
pub const OWASP_MEMORY_KIB: u32 = 19_456;
/// OWASP iteration count.
pub const OWASP_ITERATIONS: u32 = 2;
/// OWASP degree of parallelism.
pub const OWASP_PARALLELISM: u32 = 1;

/// Argon2id password hasher.
///
/// Hashing is CPU and memory heavy, so both operations run on the blocking
/// thread pool rather than an executor thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2PasswordHasher {
    memory_kib: u32,
    iterations: u32,
    parallelism: u32,
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self {
            memory_kib: OWASP_MEMORY_KIB,
            iterations: OWASP_ITERATIONS,
            parallelism: OWASP_PARALLELISM,
        }
    }
}

impl Argon2PasswordHasher {
    /// Create a hasher with custom cost parameters.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashError::Hashing`] when Argon2 rejects the
    /// parameters.
    pub fn with_params(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, PasswordHashError> {
        let hasher = Self {
            memory_kib,
            iterations,
            parallelism,
        };
        hasher.argon2()?;
        Ok(hasher)
    }

    fn argon2(self) -> Result<Argon2<'static>, PasswordHashError> {
        let params = Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(|err| PasswordHashError::hashing(format!("invalid parameters: {err}")))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }

    fn hash_blocking(self, password: &Password) -> Result<PasswordCredential, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()?
            .hash_password(password.expose().as_bytes(), &salt)
            .map_err(|err| PasswordHashError::hashing(err.to_string()))?;
        Ok(PasswordCredential::new(hash.to_string()))
    }

    fn verify_blocking(
        self,
        password: &Password,
        credential: &PasswordCredential,
    ) -> Result<bool, PasswordHashError> {
        let parsed = PasswordHash::new(credential.as_ref())
            .map_err(|err| PasswordHashError::malformed_credential(err.to_string()))?;
        match self
            .argon2()?
            .verify_password(password.expose().as_bytes(), &parsed)
        {
            Ok(()) => Ok(true),
            Err(PhcError::Password) => Ok(false),
            Err(err) => Err(PasswordHashError::malformed_credential(err.to_string())),
        }
    }
}

fn join_error(err: tokio::task::JoinError) -> PasswordHashError {
    PasswordHashError::hashing(format!("hashing task failed: {err}"))
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &Password) -> Result<PasswordCredential, PasswordHashError> {
        let hasher = *self;
        let password = password.clone();
        tokio::task::spawn_blocking(move || hasher.hash_blocking(&password))
            .await
            .map_err(join_error)?
    }

    async fn verify(
        &self,
        password: &Password,
        credential: &PasswordCredential,
    ) -> Result<bool, PasswordHashError> {
        let hasher = *self;
        let password = password.clone();
        let credential = credential.clone();
        tokio::task::spawn_blocking(move || hasher.verify_blocking(&password, &credential))
            .await
            .map_err(join_error)?
    }
}
