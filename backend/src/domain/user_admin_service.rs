//! User administration service.
//!
//! Implements the [`UsersCommand`] and [`UsersQuery`] driving ports on top of
//! the [`UserRepository`] and [`PasswordHasher`] driven ports. The service
//! owns the record lifecycle: validation, identifier shape checks, email
//! uniqueness, password hashing, and timestamp stamping.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    PasswordHashError, PasswordHasher, UserPersistenceError, UserRepository, UsersCommand,
    UsersQuery,
};
use crate::domain::{
    Error, FieldError, NewUserFields, User, UserFieldChanges, UserId, UserTimestamps,
    parse_new_user, parse_user_changes,
};

/// Service implementing the user driving ports.
#[derive(Clone)]
pub struct UserAdminService<R, H> {
    users: Arc<R>,
    hasher: Arc<H>,
    clock: Arc<dyn Clock>,
}

impl<R, H> UserAdminService<R, H> {
    /// Create a new service.
    ///
    /// # Examples
    /// ```ignore
    /// use std::sync::Arc;
    /// use mockable::DefaultClock;
    ///
    /// let service = UserAdminService::new(
    ///     Arc::new(DieselUserRepository::new(pool)),
    ///     Arc::new(Argon2PasswordHasher::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// ```
    pub fn new(users: Arc<R>, hasher: Arc<H>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            hasher,
            clock,
        }
    }
}

fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            warn!(%message, "user repository unavailable");
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { email } => {
            debug!(%email, "email uniqueness constraint rejected write");
            email_conflict()
        }
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

fn validation_failed(errors: &[FieldError]) -> Error {
    Error::invalid_request("Validation failed").with_details(json!(errors))
}

fn email_conflict() -> Error {
    Error::conflict("Email already exists").with_details(json!([FieldError::email_taken()]))
}

fn user_not_found(id: &UserId) -> Error {
    Error::not_found("User not found").with_details(json!({ "id": id.to_string() }))
}

fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|_| {
        Error::invalid_identifier("Invalid ID").with_details(json!({
            "field": "id",
            "value": raw,
        }))
    })
}

impl<R, H> UserAdminService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    /// Fail with a conflict when `email` belongs to a user other than `owner`.
    async fn ensure_email_available(
        &self,
        email: &crate::domain::EmailAddress,
        owner: Option<&UserId>,
    ) -> Result<(), Error> {
        let holder = self
            .users
            .find_id_by_email(email)
            .await
            .map_err(map_persistence_error)?;
        match holder {
            Some(holder) if Some(&holder) != owner => Err(email_conflict()),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<R, H> UsersCommand for UserAdminService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn create(&self, fields: NewUserFields) -> Result<User, Error> {
        let new_user = parse_new_user(&fields).map_err(|errors| validation_failed(&errors))?;
        self.ensure_email_available(&new_user.email, None).await?;

        let credential = self
            .hasher
            .hash(&new_user.password)
            .await
            .map_err(map_hash_error)?;
        let user = User::new(
            UserId::random(),
            new_user.name,
            new_user.email,
            new_user.age,
            UserTimestamps::created_at(self.clock.utc()),
        );

        let created = self
            .users
            .insert(&user, &credential)
            .await
            .map_err(map_persistence_error)?;
        info!(user_id = %created.id(), "user created");
        Ok(created)
    }

    async fn update(&self, id: &str, changes: UserFieldChanges) -> Result<User, Error> {
        let user_id = parse_user_id(id)?;
        let changes = parse_user_changes(&changes).map_err(|errors| validation_failed(&errors))?;
        if let Some(email) = changes.email.as_ref() {
            self.ensure_email_available(email, Some(&user_id)).await?;
        }

        let updated = self
            .users
            .update(&user_id, &changes, self.clock.utc())
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| user_not_found(&user_id))?;
        info!(user_id = %updated.id(), "user updated");
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<User, Error> {
        let user_id = parse_user_id(id)?;
        let deleted = self
            .users
            .delete(&user_id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| user_not_found(&user_id))?;
        info!(user_id = %deleted.id(), "user deleted");
        Ok(deleted)
    }
}

#[async_trait]
impl<R, H> UsersQuery for UserAdminService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.users.list().await.map_err(map_persistence_error)
    }

    async fn get_user(&self, id: &str) -> Result<User, Error> {
        let user_id = parse_user_id(id)?;
        self.users
            .find_by_id(&user_id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| user_not_found(&user_id))
    }
}
