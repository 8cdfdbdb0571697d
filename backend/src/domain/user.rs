//! User data model.
//!
//! Each field of a user record is a newtype whose constructor enforces the
//! field's invariant, so a [`User`] assembled from these parts is valid by
//! construction. Raw request input is checked field by field in
//! [`crate::domain::user_validation`], which reports every failure at once.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use uuid::Uuid;
use zeroize::Zeroizing;

/// Validation errors returned by the user field constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Identifier is not a 36-character hyphenated UUID.
    #[error("user id must be a hyphenated UUID")]
    InvalidId,
    /// Name is empty once trimmed.
    #[error("name must not be empty")]
    EmptyName,
    /// Name exceeds the stored column width.
    #[error("name must be at most {max} characters")]
    NameTooLong { max: usize },
    /// Password is empty once trimmed.
    #[error("password must not be empty")]
    EmptyPassword,
    /// Email is empty once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Email does not match the accepted address shape.
    #[error("email must look like local-part@domain.tld")]
    InvalidEmail,
    /// Email exceeds the stored column width.
    #[error("email must be at most {max} characters")]
    EmailTooLong { max: usize },
    /// Age is not an integer-valued number.
    #[error("age must be an integer")]
    AgeNotInteger,
    /// Age falls outside the accepted range.
    #[error("age must be between {min} and {max}")]
    AgeOutOfRange { min: u8, max: u8 },
    /// `updated_at` precedes `created_at`.
    #[error("updated_at must not precede created_at")]
    UpdatedBeforeCreated,
}

/// Maximum length, in characters, of names and email addresses.
pub const TEXT_FIELD_MAX_CHARS: usize = 255;

/// Length of the canonical hyphenated UUID representation.
pub const USER_ID_LENGTH: usize = 36;

/// Stable user identifier stored as a UUID.
///
/// Only the 36-character hyphenated form is accepted; braced, URN, and
/// simple (unhyphenated) spellings are rejected so that identifiers have a
/// single fixed shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from its textual form.
    ///
    /// # Examples
    /// ```
    /// use users_api::domain::UserId;
    ///
    /// assert!(UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").is_ok());
    /// assert!(UserId::new("abc").is_err());
    /// ```
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.len() != USER_ID_LENGTH {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::try_parse(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random (v4) [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap a UUID read back from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

/// Trimmed, non-empty user name of at most [`TEXT_FIELD_MAX_CHARS`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    /// Trim and validate a name.
    pub fn new(name: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        if trimmed.chars().count() > TEXT_FIELD_MAX_CHARS {
            return Err(UserValidationError::NameTooLong {
                max: TEXT_FIELD_MAX_CHARS,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the name.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Conservative shape check: local part, "@", and a dotted domain.
        let pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Case-folded email address.
///
/// Input is trimmed and lowercased before the shape check, so two addresses
/// differing only by case compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Normalise and validate an email address.
    ///
    /// # Examples
    /// ```
    /// use users_api::domain::EmailAddress;
    ///
    /// let email = EmailAddress::new("ADA@X.COM").expect("valid email");
    /// assert_eq!(email.as_str(), "ada@x.com");
    /// ```
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalised = email.as_ref().trim().to_lowercase();
        if normalised.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if normalised.chars().count() > TEXT_FIELD_MAX_CHARS {
            return Err(UserValidationError::EmailTooLong {
                max: TEXT_FIELD_MAX_CHARS,
            });
        }
        if !email_regex().is_match(&normalised) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(normalised))
    }

    /// Borrow the normalised address.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Minimum accepted age.
pub const AGE_MIN: u8 = 0;
/// Maximum accepted age.
pub const AGE_MAX: u8 = 150;

/// Age in whole years within `[AGE_MIN, AGE_MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Age(u8);

impl Age {
    /// Validate an age expressed as a signed integer.
    pub fn new(years: i64) -> Result<Self, UserValidationError> {
        u8::try_from(years)
            .ok()
            .filter(|value| (AGE_MIN..=AGE_MAX).contains(value))
            .map(Self)
            .ok_or(UserValidationError::AgeOutOfRange {
                min: AGE_MIN,
                max: AGE_MAX,
            })
    }

    /// Age in years.
    pub fn years(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Plaintext password supplied at creation time.
///
/// The buffer is zeroed on drop and never printed.
#[derive(Clone)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate a plaintext password; whitespace-only input is rejected.
    pub fn new(password: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = Zeroizing::new(password.into());
        if raw.trim().is_empty() {
            return Err(UserValidationError::EmptyPassword);
        }
        Ok(Self(raw))
    }

    /// Expose the plaintext for hashing.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Opaque hashed password as persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordCredential(String);

impl PasswordCredential {
    /// Wrap an encoded hash produced by a password hasher.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }
}

impl AsRef<str> for PasswordCredential {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordCredential(<redacted>)")
    }
}

/// Creation and modification timestamps of a record.
///
/// ## Invariants
/// - `updated_at >= created_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserTimestamps {
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserTimestamps {
    /// Timestamps for a record created at `now`.
    pub fn created_at(now: DateTime<Utc>) -> Self {
        Self {
            created_at: now,
            updated_at: now,
        }
    }

    /// Validate a pair of timestamps read back from storage.
    pub fn try_new(
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, UserValidationError> {
        if updated_at < created_at {
            return Err(UserValidationError::UpdatedBeforeCreated);
        }
        Ok(Self {
            created_at,
            updated_at,
        })
    }

    /// Creation timestamp.
    pub fn created(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last modification timestamp.
    pub fn updated(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Application user as returned to callers; never carries the credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: UserName,
    email: EmailAddress,
    age: Age,
    timestamps: UserTimestamps,
}

impl User {
    /// Build a new [`User`] from validated components.
    pub fn new(
        id: UserId,
        name: UserName,
        email: EmailAddress,
        age: Age,
        timestamps: UserTimestamps,
    ) -> Self {
        Self {
            id,
            name,
            email,
            age,
            timestamps,
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Trimmed display name.
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Case-folded email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Age in years.
    pub fn age(&self) -> Age {
        self.age
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.timestamps.created()
    }

    /// Last modification timestamp.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.timestamps.updated()
    }
}

/// Validated input for creating a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: UserName,
    pub email: EmailAddress,
    pub age: Age,
    pub password: Password,
}

/// Validated partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub name: Option<UserName>,
    pub email: Option<EmailAddress>,
    pub age: Option<Age>,
}

impl UserChanges {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.age.is_none()
    }
}
