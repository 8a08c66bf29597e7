//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i32,
        max: i32,
        actual: i32,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("'{field}' must not reference itself")]
    SelfReference { field: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i32, max: i32, actual: i32) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a self-reference validation error.
    pub fn self_reference(field: impl Into<String>) -> Self {
        ValidationError::SelfReference { field: field.into() }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    EmptyField,
    OutOfRange,
    InvalidFormat,
    SelfReference,

    // Not found errors
    ObjectiveNotFound,
    DependencyNotFound,
    CycleNotFound,

    // State errors
    InvalidPhaseTransition,

    // Infrastructure errors
    ConcurrentModification,
    StorageError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::SelfReference => "SELF_REFERENCE",
            ErrorCode::ObjectiveNotFound => "OBJECTIVE_NOT_FOUND",
            ErrorCode::DependencyNotFound => "DEPENDENCY_NOT_FOUND",
            ErrorCode::CycleNotFound => "CYCLE_NOT_FOUND",
            ErrorCode::InvalidPhaseTransition => "INVALID_PHASE_TRANSITION",
            ErrorCode::ConcurrentModification => "CONCURRENT_MODIFICATION",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a not-found error carrying the missing id as a detail.
    pub fn not_found(code: ErrorCode, id: impl fmt::Display) -> Self {
        let id = id.to_string();
        Self::new(code, format!("Entity not found: {}", id)).with_detail("id", id)
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let code = match &err {
            ValidationError::EmptyField { .. } => ErrorCode::EmptyField,
            ValidationError::OutOfRange { .. } => ErrorCode::OutOfRange,
            ValidationError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
            ValidationError::SelfReference { .. } => ErrorCode::SelfReference,
        };
        DomainError::new(code, err.to_string())
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("description");
        assert_eq!(format!("{}", err), "Field 'description' cannot be empty");
    }

    #[test]
    fn validation_error_self_reference_displays_correctly() {
        let err = ValidationError::self_reference("dependency");
        assert_eq!(format!("{}", err), "'dependency' must not reference itself");
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::CycleNotFound, "Cycle not found");
        assert_eq!(format!("{}", err), "[CYCLE_NOT_FOUND] Cycle not found");
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::new(ErrorCode::ValidationFailed, "Validation failed")
            .with_detail("field", "owner")
            .with_detail("reason", "empty");

        assert_eq!(err.details.get("field"), Some(&"owner".to_string()));
        assert_eq!(err.details.get("reason"), Some(&"empty".to_string()));
    }

    #[test]
    fn validation_error_converts_to_domain_error_with_matching_code() {
        let err: DomainError = ValidationError::empty_field("title").into();
        assert_eq!(err.code, ErrorCode::EmptyField);

        let err: DomainError = ValidationError::self_reference("dependency").into();
        assert_eq!(err.code, ErrorCode::SelfReference);
    }

    #[test]
    fn not_found_records_id_detail() {
        let err = DomainError::not_found(ErrorCode::DependencyNotFound, "dep-42");
        assert_eq!(err.code, ErrorCode::DependencyNotFound);
        assert_eq!(err.details.get("id"), Some(&"dep-42".to_string()));
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(
            format!("{}", ErrorCode::InvalidPhaseTransition),
            "INVALID_PHASE_TRANSITION"
        );
        assert_eq!(
            format!("{}", ErrorCode::ConcurrentModification),
            "CONCURRENT_MODIFICATION"
        );
    }
}
