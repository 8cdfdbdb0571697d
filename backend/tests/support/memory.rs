//! In-memory driven port doubles.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use users_api::domain::ports::{
    PasswordHashError, PasswordHasher, UserPersistenceError, UserRepository,
};
use users_api::domain::{
    EmailAddress, Password, PasswordCredential, User, UserChanges, UserId, UserTimestamps,
};

struct StoredUser {
    user: User,
    credential: PasswordCredential,
}

/// Vector-backed user store enforcing unique emails.
#[derive(Default)]
pub struct InMemoryUserRepository {
    rows: Mutex<Vec<StoredUser>>,
}

impl InMemoryUserRepository {
    /// Stored credential for `id`, if the record exists.
    pub fn credential_of(&self, id: &UserId) -> Option<PasswordCredential> {
        self.lock()
            .iter()
            .find(|row| row.user.id() == id)
            .map(|row| row.credential.clone())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<StoredUser>> {
        self.rows.lock().expect("repository mutex poisoned")
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(
        &self,
        user: &User,
        credential: &PasswordCredential,
    ) -> Result<User, UserPersistenceError> {
        let mut rows = self.lock();
        if rows.iter().any(|row| row.user.email() == user.email()) {
            return Err(UserPersistenceError::duplicate_email(user.email().as_str()));
        }
        rows.push(StoredUser {
            user: user.clone(),
            credential: credential.clone(),
        });
        Ok(user.clone())
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut users: Vec<User> = self.lock().iter().map(|row| row.user.clone()).collect();
        users.sort_by_key(|user| std::cmp::Reverse(user.created_at()));
        Ok(users)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .lock()
            .iter()
            .find(|row| row.user.id() == id)
            .map(|row| row.user.clone()))
    }

    async fn find_id_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserId>, UserPersistenceError> {
        Ok(self
            .lock()
            .iter()
            .find(|row| row.user.email() == email)
            .map(|row| *row.user.id()))
    }

    async fn update(
        &self,
        id: &UserId,
        changes: &UserChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut rows = self.lock();
        if let Some(email) = changes.email.as_ref() {
            let taken = rows
                .iter()
                .any(|row| row.user.email() == email && row.user.id() != id);
            if taken {
                return Err(UserPersistenceError::duplicate_email(email.as_str()));
            }
        }
        let Some(row) = rows.iter_mut().find(|row| row.user.id() == id) else {
            return Ok(None);
        };

        let current = &row.user;
        let created_at = current.created_at();
        let timestamps = UserTimestamps::try_new(created_at, updated_at.max(created_at))
            .map_err(|err| UserPersistenceError::query(err.to_string()))?;
        let updated = User::new(
            *current.id(),
            changes.name.clone().unwrap_or_else(|| current.name().clone()),
            changes
                .email
                .clone()
                .unwrap_or_else(|| current.email().clone()),
            changes.age.unwrap_or(current.age()),
            timestamps,
        );
        row.user = updated.clone();
        Ok(Some(updated))
    }

    async fn delete(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut rows = self.lock();
        let position = rows.iter().position(|row| row.user.id() == id);
        Ok(position.map(|index| rows.remove(index).user))
    }
}

/// Hasher that prefixes the plaintext; never use outside tests.
pub struct PrefixHasher;

const PREFIX: &str = "hashed:";

#[async_trait]
impl PasswordHasher for PrefixHasher {
    async fn hash(&self, password: &Password) -> Result<PasswordCredential, PasswordHashError> {
        Ok(PasswordCredential::new(format!(
            "{PREFIX}{}",
            password.expose()
        )))
    }

    async fn verify(
        &self,
        password: &Password,
        credential: &PasswordCredential,
    ) -> Result<bool, PasswordHashError> {
        let Some(plain) = credential.as_ref().strip_prefix(PREFIX) else {
            return Err(PasswordHashError::malformed_credential("missing prefix"));
        };
        Ok(plain == password.expose())
    }
}
