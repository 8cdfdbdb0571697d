//! Field validation for raw user input.
//!
//! The checks here are pure: they look only at the field under test and
//! report every failing field, in the order name, password, email, age, so
//! callers can surface all problems in a single response. Fields arrive as
//! raw JSON values so a mistyped field is reported alongside the others.

use serde::Serialize;
use serde_json::Value;

use super::user::{
    AGE_MAX, AGE_MIN, Age, EmailAddress, NewUser, Password, UserChanges, UserName,
    UserValidationError,
};

/// Raw creation input as received from a client.
#[derive(Debug, Clone, Default)]
pub struct NewUserFields {
    pub name: Option<Value>,
    pub password: Option<Value>,
    pub email: Option<Value>,
    pub age: Option<Value>,
}

/// Raw partial-update input. Passwords cannot be changed through updates.
#[derive(Debug, Clone, Default)]
pub struct UserFieldChanges {
    pub name: Option<Value>,
    pub email: Option<Value>,
    pub age: Option<Value>,
}

impl UserFieldChanges {
    /// True when the payload carried no updatable field.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.age.is_none()
    }
}

/// Stable identifier for each field-level failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorCode {
    Required,
    NotAString,
    InvalidFormat,
    NotAnInteger,
    OutOfRange,
    TooLong,
    EmptyPayload,
    AlreadyExists,
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    field: &'static str,
    code: FieldErrorCode,
    message: String,
}

impl FieldError {
    fn new(field: &'static str, code: FieldErrorCode, message: impl Into<String>) -> Self {
        Self {
            field,
            code,
            message: message.into(),
        }
    }

    /// Failure reported when an update carries no fields.
    pub fn empty_payload() -> Self {
        Self::new("body", FieldErrorCode::EmptyPayload, "No data provided")
    }

    /// Failure reported when an email already belongs to a user.
    pub fn email_taken() -> Self {
        Self::new(
            "email",
            FieldErrorCode::AlreadyExists,
            "The email is already in use",
        )
    }

    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Failure category.
    pub fn code(&self) -> FieldErrorCode {
        self.code
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

fn required(field: &'static str, message: &str) -> FieldError {
    FieldError::new(field, FieldErrorCode::Required, message)
}

fn text<'a>(field: &'static str, label: &str, raw: &'a Value) -> Result<&'a str, FieldError> {
    raw.as_str().ok_or_else(|| {
        FieldError::new(
            field,
            FieldErrorCode::NotAString,
            format!("{label} must be a string"),
        )
    })
}

fn check_name(raw: Option<&Value>) -> Result<UserName, FieldError> {
    let raw = raw.ok_or_else(|| required("name", "Name is required"))?;
    let raw = text("name", "Name", raw)?;
    UserName::new(raw).map_err(|err| match err {
        UserValidationError::NameTooLong { max } => FieldError::new(
            "name",
            FieldErrorCode::TooLong,
            format!("Name must be at most {max} characters"),
        ),
        _ => required("name", "Name is required"),
    })
}

fn check_password(raw: Option<&Value>) -> Result<Password, FieldError> {
    let raw = raw.ok_or_else(|| required("password", "Password is required"))?;
    let raw = text("password", "Password", raw)?;
    Password::new(raw).map_err(|_| required("password", "Password is required"))
}

fn check_email(raw: Option<&Value>) -> Result<EmailAddress, FieldError> {
    let raw = raw.ok_or_else(|| required("email", "Email is required"))?;
    let raw = text("email", "Email", raw)?;
    EmailAddress::new(raw).map_err(|err| match err {
        UserValidationError::EmptyEmail => required("email", "Email is required"),
        UserValidationError::EmailTooLong { max } => FieldError::new(
            "email",
            FieldErrorCode::TooLong,
            format!("Email must be at most {max} characters"),
        ),
        _ => FieldError::new("email", FieldErrorCode::InvalidFormat, "Email is not valid"),
    })
}

/// Interpret a JSON value as a whole number of years.
///
/// Integral floats such as `30.0` are accepted; fractional values, strings,
/// booleans, and other JSON types are not.
fn integral_years(value: &Value) -> Result<i64, UserValidationError> {
    let Value::Number(number) = value else {
        return Err(UserValidationError::AgeNotInteger);
    };
    if let Some(years) = number.as_i64() {
        return Ok(years);
    }
    if number.as_u64().is_some() {
        // Larger than i64::MAX: certainly out of range.
        return Err(UserValidationError::AgeOutOfRange {
            min: AGE_MIN,
            max: AGE_MAX,
        });
    }
    match number.as_f64() {
        Some(float) if float.is_finite() && float.fract() == 0.0 => {
            if !(f64::from(AGE_MIN)..=f64::from(AGE_MAX)).contains(&float) {
                return Err(UserValidationError::AgeOutOfRange {
                    min: AGE_MIN,
                    max: AGE_MAX,
                });
            }
            #[expect(
                clippy::cast_possible_truncation,
                reason = "value is integral and within the age range"
            )]
            let years = float as i64;
            Ok(years)
        }
        _ => Err(UserValidationError::AgeNotInteger),
    }
}

fn check_age(raw: Option<&Value>) -> Result<Age, FieldError> {
    let raw = raw.ok_or_else(|| required("age", "Age is required"))?;
    integral_years(raw)
        .and_then(Age::new)
        .map_err(|err| match err {
            UserValidationError::AgeNotInteger => {
                FieldError::new("age", FieldErrorCode::NotAnInteger, "Age must be an integer")
            }
            _ => FieldError::new(
                "age",
                FieldErrorCode::OutOfRange,
                format!("Age must be between {AGE_MIN} and {AGE_MAX}"),
            ),
        })
}

/// Validate and convert creation input.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use users_api::domain::{NewUserFields, parse_new_user};
///
/// let fields = NewUserFields {
///     name: Some(json!("Ada")),
///     password: Some(json!("x")),
///     email: Some(json!("ADA@X.COM")),
///     age: Some(json!(30)),
/// };
/// let user = parse_new_user(&fields).expect("valid input");
/// assert_eq!(user.email.as_str(), "ada@x.com");
/// ```
pub fn parse_new_user(fields: &NewUserFields) -> Result<NewUser, Vec<FieldError>> {
    let name = check_name(fields.name.as_ref());
    let password = check_password(fields.password.as_ref());
    let email = check_email(fields.email.as_ref());
    let age = check_age(fields.age.as_ref());

    match (name, password, email, age) {
        (Ok(name), Ok(password), Ok(email), Ok(age)) => Ok(NewUser {
            name,
            email,
            age,
            password,
        }),
        (name, password, email, age) => Err([name.err(), password.err(), email.err(), age.err()]
            .into_iter()
            .flatten()
            .collect()),
    }
}

/// Validate creation input, returning every failure (empty when valid).
pub fn validate_new_user(fields: &NewUserFields) -> Vec<FieldError> {
    parse_new_user(fields).err().unwrap_or_default()
}

/// Validate and convert a partial update.
///
/// Only the fields present are checked; an update with no fields fails with
/// a single [`FieldErrorCode::EmptyPayload`] error.
pub fn parse_user_changes(changes: &UserFieldChanges) -> Result<UserChanges, Vec<FieldError>> {
    if changes.is_empty() {
        return Err(vec![FieldError::empty_payload()]);
    }

    let name = changes
        .name
        .as_ref()
        .map(|raw| check_name(Some(raw)))
        .transpose();
    let email = changes
        .email
        .as_ref()
        .map(|raw| check_email(Some(raw)))
        .transpose();
    let age = changes
        .age
        .as_ref()
        .map(|raw| check_age(Some(raw)))
        .transpose();

    match (name, email, age) {
        (Ok(name), Ok(email), Ok(age)) => Ok(UserChanges { name, email, age }),
        (name, email, age) => Err([name.err(), email.err(), age.err()]
            .into_iter()
            .flatten()
            .collect()),
    }
}

/// Validate a partial update, returning every failure (empty when valid).
pub fn validate_user_changes(changes: &UserFieldChanges) -> Vec<FieldError> {
    parse_user_changes(changes).err().unwrap_or_default()
}
