//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every validation failure becomes an `InvalidRequest` error whose details
//! name the offending field and a stable reason code.

use serde_json::json;

use crate::domain::{
    Error, LoginValidationError, UNKNOWN_EMAIL_MESSAGE, UserId, UserValidationError,
};

/// Validation error codes raised by the adapter itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidId,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidId => "invalid_id",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: &'static str,
    message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    fn with_code(self, code: &str) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code,
        }))
    }

    fn with_value(self, code: &str, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code,
        }))
    }
}

pub(crate) const USER_ID_FIELD: FieldName = FieldName::new("id");

pub(crate) fn invalid_id_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a positive integer"))
        .with_value(ErrorCode::InvalidId.as_str(), value)
}

/// Parse a path segment into a [`UserId`].
pub(crate) fn parse_user_id(value: &str, field: FieldName) -> Result<UserId, Error> {
    UserId::parse(value).map_err(|_| invalid_id_error(field, value))
}

/// Map a user field validation failure to an HTTP-safe error.
pub(crate) fn user_validation_error(error: UserValidationError) -> Error {
    ValidationError::new(error.field(), error.to_string()).with_code(error.code())
}

/// Map a login payload validation failure to an HTTP-safe error.
///
/// A blank email can match no account, so it reports the unknown-email
/// outcome rather than a field error.
pub(crate) fn login_validation_error(error: LoginValidationError) -> Error {
    match error {
        LoginValidationError::EmptyEmail => Error::invalid_request(UNKNOWN_EMAIL_MESSAGE),
        LoginValidationError::EmptyPassword => {
            ValidationError::new(error.field(), error.to_string()).with_code(error.code())
        }
    }
}
