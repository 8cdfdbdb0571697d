//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request body is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The path identifier is not a hyphenated UUID.
    #[schema(rename = "invalid_identifier")]
    InvalidIdentifier,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The email address is already registered.
    #[schema(rename = "conflict")]
    Conflict,
    /// The database is temporarily unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::FieldError`].
///
/// One entry of the `details` array on validation failures.
#[derive(ToSchema)]
#[schema(as = crate::domain::FieldError)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct FieldErrorSchema {
    /// Offending field, or `body` for an empty update.
    #[schema(example = "age")]
    field: String,
    /// Stable field error code.
    #[schema(example = "out_of_range")]
    code: String,
    /// Human-readable message.
    #[schema(example = "Age must be between 0 and 150")]
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn error_code_schema_variants_match_domain() {
        use crate::domain::ErrorCode;

        let schema_json = schema_to_json::<ErrorCodeSchema>();
        assert_eq!(ErrorCodeSchema::name(), "crate.domain.ErrorCode");
        for code in [
            ErrorCode::InvalidRequest,
            ErrorCode::InvalidIdentifier,
            ErrorCode::NotFound,
            ErrorCode::Conflict,
            ErrorCode::ServiceUnavailable,
            ErrorCode::InternalError,
        ] {
            assert!(
                schema_json.contains(code.as_str()),
                "missing {}",
                code.as_str()
            );
        }
    }

    #[test]
    fn field_error_schema_has_expected_fields() {
        let schema_json = schema_to_json::<FieldErrorSchema>();
        assert_eq!(FieldErrorSchema::name(), "crate.domain.FieldError");
        for field in ["field", "code", "message"] {
            assert!(schema_json.contains(field), "missing {field}");
        }
    }
}
