//! Field-level validation errors for form submissions.
//!
//! Every failure becomes an `invalid_request` [`Error`] whose details name the
//! offending form field and a stable machine-readable code.

use serde_json::json;

use crate::domain::{Error, RecordValidationError, UserValidationError};

/// Machine-readable reason attached to a field error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldErrorCode {
    MissingField,
    InvalidUuid,
    InvalidEmail,
    NotNumeric,
    OutOfRange,
    TooPrecise,
    Empty,
    TooLong,
    UnknownAction,
}

impl FieldErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidUuid => "invalid_uuid",
            Self::InvalidEmail => "invalid_email",
            Self::NotNumeric => "not_numeric",
            Self::OutOfRange => "out_of_range",
            Self::TooPrecise => "too_precise",
            Self::Empty => "empty",
            Self::TooLong => "too_long",
            Self::UnknownAction => "unknown_action",
        }
    }
}

/// Form field name as submitted by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) const ACTION: FieldName = FieldName::new("_action");
pub(crate) const EMAIL: FieldName = FieldName::new("email");
pub(crate) const PASSWORD: FieldName = FieldName::new("password");
pub(crate) const FIRST_NAME: FieldName = FieldName::new("firstName");
pub(crate) const LAST_NAME: FieldName = FieldName::new("lastName");
pub(crate) const RECORD_ID: FieldName = FieldName::new("recordId");
pub(crate) const INCOME: FieldName = FieldName::new("income");
pub(crate) const PERCENTAGE: FieldName = FieldName::new("percentage");
pub(crate) const NAME: FieldName = FieldName::new("name");

pub(crate) fn field_error(
    field: FieldName,
    code: FieldErrorCode,
    message: impl Into<String>,
) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    field_error(
        field,
        FieldErrorCode::MissingField,
        format!("missing required field: {}", field.as_str()),
    )
}

pub(crate) fn unknown_action_error(value: &str) -> Error {
    Error::invalid_request(format!("unknown action: {value}")).with_details(json!({
        "field": ACTION.as_str(),
        "code": FieldErrorCode::UnknownAction.as_str(),
        "value": value,
    }))
}

/// Error for a user field that failed domain validation.
pub(crate) fn user_field_error(field: FieldName, err: &UserValidationError) -> Error {
    let code = match err {
        UserValidationError::EmptyId | UserValidationError::InvalidId => FieldErrorCode::InvalidUuid,
        UserValidationError::InvalidEmail => FieldErrorCode::InvalidEmail,
        UserValidationError::EmptyEmail
        | UserValidationError::EmptyPassword
        | UserValidationError::EmptyName => FieldErrorCode::Empty,
        UserValidationError::EmailTooLong { .. } | UserValidationError::NameTooLong { .. } => {
            FieldErrorCode::TooLong
        }
    };
    field_error(field, code, format!("{}: {err}", field.as_str()))
}

/// Error for a record field that failed domain validation.
///
/// The field is implied by the variant, so callers only pass the error.
pub(crate) fn record_field_error(err: &RecordValidationError) -> Error {
    let (field, code) = match err {
        RecordValidationError::InvalidId => (RECORD_ID, FieldErrorCode::InvalidUuid),
        RecordValidationError::IncomeNotNumeric => (INCOME, FieldErrorCode::NotNumeric),
        RecordValidationError::NegativeIncome | RecordValidationError::IncomeTooLarge => {
            (INCOME, FieldErrorCode::OutOfRange)
        }
        RecordValidationError::IncomeTooPrecise { .. } => (INCOME, FieldErrorCode::TooPrecise),
        RecordValidationError::PercentageNotNumeric => (PERCENTAGE, FieldErrorCode::NotNumeric),
        RecordValidationError::PercentageOutOfRange => (PERCENTAGE, FieldErrorCode::OutOfRange),
        RecordValidationError::PercentageTooPrecise { .. } => {
            (PERCENTAGE, FieldErrorCode::TooPrecise)
        }
        RecordValidationError::EmptyName => (NAME, FieldErrorCode::Empty),
        RecordValidationError::NameTooLong { .. } => (NAME, FieldErrorCode::TooLong),
    };
    field_error(field, code, err.to_string())
}
