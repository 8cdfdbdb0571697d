//! Credential adapters implementing the password hashing port.

mod argon2_password_hasher;

pub use argon2_password_hasher::Argon2PasswordHasher;
