//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. When a
//! migration changes the table, regenerate with `diesel print-schema` or
//! update by hand.

diesel::table! {
    /// User records.
    ///
    /// `email` carries the `users_email_key` unique constraint and is always
    /// stored lowercased. `age` is constrained to 0..=150.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Display name (max 255 characters).
        #[max_length = 255]
        name -> Varchar,
        /// Argon2id PHC string; never selected for responses.
        #[max_length = 255]
        password -> Varchar,
        /// Lowercased, unique email address.
        #[max_length = 255]
        email -> Varchar,
        /// Age in whole years.
        age -> Int4,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}
