//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Every statement is built through Diesel's query builder, so request
//! values are always sent as bind parameters. Writes return the stored row
//! via `RETURNING` to avoid a second round trip.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::sql_types::Timestamptz;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{
    Age, EmailAddress, PasswordCredential, User, UserChanges, UserId, UserName, UserTimestamps,
};

use super::diesel_helpers::{map_diesel_error, map_pool_error, map_write_error};
use super::models::{NewUserRow, UserChangeset, UserRow};
use super::pool::DbPool;
use super::schema::users;

diesel::define_sql_function! {
    /// PostgreSQL `GREATEST` over two timestamps.
    fn greatest(a: Timestamptz, b: Timestamptz) -> Timestamptz;
}

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn corrupt_row(id: Uuid, reason: impl std::fmt::Display) -> UserPersistenceError {
    tracing::warn!(user_id = %id, %reason, "stored user row failed validation");
    UserPersistenceError::query(format!("stored user {id} is invalid: {reason}"))
}

/// Convert a database row to a domain user.
fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let id = row.id;
    let name = UserName::new(&row.name).map_err(|err| corrupt_row(id, err))?;
    let email = EmailAddress::new(&row.email).map_err(|err| corrupt_row(id, err))?;
    let age = Age::new(i64::from(row.age)).map_err(|err| corrupt_row(id, err))?;
    let timestamps =
        UserTimestamps::try_new(row.created_at, row.updated_at).map_err(|err| corrupt_row(id, err))?;
    Ok(User::new(UserId::from_uuid(id), name, email, age, timestamps))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(
        &self,
        user: &User,
        credential: &PasswordCredential,
    ) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewUserRow {
            id: *user.id().as_uuid(),
            name: user.name().as_str(),
            password: credential.as_ref(),
            email: user.email().as_str(),
            age: i32::from(user.age().years()),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        };

        let stored: UserRow = diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_write_error(err, user.email().as_str()))?;

        row_to_user(stored)
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .select(UserRow::as_select())
            .order(users::created_at.desc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_user).collect()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .find(*id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn find_id_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserId>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let id: Option<Uuid> = users::table
            .filter(users::email.eq(email.as_str()))
            .select(users::id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(id.map(UserId::from_uuid))
    }

    async fn update(
        &self,
        id: &UserId,
        changes: &UserChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changeset = UserChangeset {
            name: changes.name.as_ref().map(UserName::as_str),
            email: changes.email.as_ref().map(EmailAddress::as_str),
            age: changes.age.map(|age| i32::from(age.years())),
        };
        let email = changeset.email.unwrap_or_default();

        let row: Option<UserRow> = diesel::update(users::table.find(*id.as_uuid()))
            .set((
                changeset,
                users::updated_at.eq(greatest(users::created_at, updated_at)),
            ))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_write_error(err, email))?;

        row.map(row_to_user).transpose()
    }

    async fn delete(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = diesel::delete(users::table.find(*id.as_uuid()))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }
}
