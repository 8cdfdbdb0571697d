//! Error mapping shared by the Diesel user adapters.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, warn};

use crate::domain::ports::UserPersistenceError;

use super::pool::PoolError;

/// Name of the unique constraint on `users.email`.
pub(crate) const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

/// Map pool errors to user repository connection errors.
pub(crate) fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(error.message())
}

/// Map Diesel errors from reads to user repository errors.
pub(crate) fn map_diesel_error(error: DieselError) -> UserPersistenceError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => UserPersistenceError::query("record not found"),
        DieselError::QueryBuilderError(_) => UserPersistenceError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        DieselError::DatabaseError(_, _) => UserPersistenceError::query("database error"),
        _ => UserPersistenceError::query("database error"),
    }
}

/// Map Diesel errors from writes carrying `email`.
///
/// A unique violation on the email constraint becomes
/// [`UserPersistenceError::DuplicateEmail`]; everything else falls through to
/// [`map_diesel_error`].
pub(crate) fn map_write_error(error: DieselError, email: &str) -> UserPersistenceError {
    if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = &error {
        match info.constraint_name() {
            None | Some(EMAIL_UNIQUE_CONSTRAINT) => {
                return UserPersistenceError::duplicate_email(email);
            }
            Some(other) => {
                warn!(constraint = other, "unexpected unique violation on users");
            }
        }
    }
    map_diesel_error(error)
}
