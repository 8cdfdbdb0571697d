//! Domain ports defining the edges of the hexagon.
//!
//! Driving ports (`UsersCommand`, `UsersQuery`) are what inbound adapters
//! call. Driven ports (`UserRepository`, `PasswordHasher`) are what the
//! domain needs from infrastructure; each exposes a strongly typed error so
//! adapters map their failures into predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod password_hasher;
mod user_repository;
mod users_command;
mod users_query;

#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::UsersCommand;
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
