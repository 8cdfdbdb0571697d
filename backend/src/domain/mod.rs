//! Domain primitives, validation, and the user service.
//!
//! Purpose: Define strongly typed user entities and the rules that govern
//! them, independent of HTTP and PostgreSQL. Inbound adapters depend on the
//! driving ports in [`ports`]; outbound adapters implement the driven ones.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - User (alias to `user::User`): a persisted user without its credential.
//! - UserAdminService: implements `UsersCommand` and `UsersQuery`.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
mod user_admin_service;
pub mod user_validation;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::TraceId;
pub use self::user::{
    AGE_MAX, AGE_MIN, Age, EmailAddress, NewUser, Password, PasswordCredential, TEXT_FIELD_MAX_CHARS,
    USER_ID_LENGTH, User, UserChanges, UserId, UserName, UserTimestamps, UserValidationError,
};
pub use self::user_admin_service::UserAdminService;
pub use self::user_validation::{
    FieldError, FieldErrorCode, NewUserFields, UserFieldChanges, parse_new_user,
    parse_user_changes, validate_new_user, validate_user_changes,
};

/// HTTP header name used to propagate trace identifiers.
pub const TRACE_ID_HEADER: &str = "trace-id";
