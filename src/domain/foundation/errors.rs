//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        actual: f64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, actual: f64) -> Self {
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

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

/// Broad failure classes exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Conflict,
    BusinessRule,
    Infrastructure,
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    EmptyField,
    OutOfRange,
    InvalidFormat,
    InvalidWindow,
    SelfReview,

    // Not found errors
    CycleNotFound,
    TrackNotFound,
    PillarNotFound,
    CriterionNotFound,
    RubricEntryNotFound,
    UserNotFound,
    EvaluationNotFound,
    EqualizationNotFound,

    // Conflict errors
    DuplicateCycleName,
    EqualizationExists,
    EqualizationStale,
    PayloadKindMismatch,

    // Business rule errors
    CycleActive,
    CycleNotActive,
    CycleFinalized,
    CycleNotStarted,

    // Infrastructure errors
    DatabaseError,
    InternalError,
}

impl ErrorCode {
    /// Returns the category this code belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat
            | ErrorCode::InvalidWindow
            | ErrorCode::SelfReview => ErrorCategory::Validation,
            ErrorCode::CycleNotFound
            | ErrorCode::TrackNotFound
            | ErrorCode::PillarNotFound
            | ErrorCode::CriterionNotFound
            | ErrorCode::RubricEntryNotFound
            | ErrorCode::UserNotFound
            | ErrorCode::EvaluationNotFound
            | ErrorCode::EqualizationNotFound => ErrorCategory::NotFound,
            ErrorCode::DuplicateCycleName
            | ErrorCode::EqualizationExists
            | ErrorCode::EqualizationStale
            | ErrorCode::PayloadKindMismatch => ErrorCategory::Conflict,
            ErrorCode::CycleActive
            | ErrorCode::CycleNotActive
            | ErrorCode::CycleFinalized
            | ErrorCode::CycleNotStarted => ErrorCategory::BusinessRule,
            ErrorCode::DatabaseError | ErrorCode::InternalError => ErrorCategory::Infrastructure,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::InvalidWindow => "INVALID_WINDOW",
            ErrorCode::SelfReview => "SELF_REVIEW",
            ErrorCode::CycleNotFound => "CYCLE_NOT_FOUND",
            ErrorCode::TrackNotFound => "TRACK_NOT_FOUND",
            ErrorCode::PillarNotFound => "PILLAR_NOT_FOUND",
            ErrorCode::CriterionNotFound => "CRITERION_NOT_FOUND",
            ErrorCode::RubricEntryNotFound => "RUBRIC_ENTRY_NOT_FOUND",
            ErrorCode::UserNotFound => "USER_NOT_FOUND",
            ErrorCode::EvaluationNotFound => "EVALUATION_NOT_FOUND",
            ErrorCode::EqualizationNotFound => "EQUALIZATION_NOT_FOUND",
            ErrorCode::DuplicateCycleName => "DUPLICATE_CYCLE_NAME",
            ErrorCode::EqualizationExists => "EQUALIZATION_EXISTS",
            ErrorCode::EqualizationStale => "EQUALIZATION_STALE",
            ErrorCode::PayloadKindMismatch => "PAYLOAD_KIND_MISMATCH",
            ErrorCode::CycleActive => "CYCLE_ACTIVE",
            ErrorCode::CycleNotActive => "CYCLE_NOT_ACTIVE",
            ErrorCode::CycleFinalized => "CYCLE_FINALIZED",
            ErrorCode::CycleNotStarted => "CYCLE_NOT_STARTED",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
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

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ValidationFailed,
            message: message.into(),
            details: HashMap::new(),
        }
        .with_detail("field", field.into())
    }

    /// Creates a database error from any displayable driver error.
    pub fn database(context: &str, err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::DatabaseError, format!("{}: {}", context, err))
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Returns the category of the underlying code.
    pub fn category(&self) -> ErrorCategory {
        self.code.category()
    }
}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let code = match &err {
            ValidationError::EmptyField { .. } => ErrorCode::EmptyField,
            ValidationError::OutOfRange { .. } => ErrorCode::OutOfRange,
            ValidationError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
        };
        let field = err.field().to_string();
        DomainError::new(code, err.to_string()).with_detail("field", field)
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
        let err = ValidationError::empty_field("name");
        assert_eq!(format!("{}", err), "Field 'name' cannot be empty");
    }

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("score", 1.0, 5.0, 7.0);
        assert_eq!(
            format!("{}", err),
            "Field 'score' must be between 1 and 5, got 7"
        );
    }

    #[test]
    fn validation_error_converts_into_domain_error_with_field_detail() {
        let err: DomainError = ValidationError::invalid_format("cycle_id", "not a number").into();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(err.details.get("field"), Some(&"cycle_id".to_string()));
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::CycleNotFound, "Cycle not found: 7");
        assert_eq!(format!("{}", err), "[CYCLE_NOT_FOUND] Cycle not found: 7");
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::new(ErrorCode::ValidationFailed, "Validation failed")
            .with_detail("field", "end_date")
            .with_detail("reason", "before start");

        assert_eq!(err.details.get("field"), Some(&"end_date".to_string()));
        assert_eq!(err.details.get("reason"), Some(&"before start".to_string()));
    }

    #[test]
    fn error_codes_map_to_categories() {
        assert_eq!(ErrorCode::CycleNotFound.category(), ErrorCategory::NotFound);
        assert_eq!(ErrorCode::EqualizationExists.category(), ErrorCategory::Conflict);
        assert_eq!(ErrorCode::EqualizationStale.category(), ErrorCategory::Conflict);
        assert_eq!(ErrorCode::CycleFinalized.category(), ErrorCategory::BusinessRule);
        assert_eq!(ErrorCode::InvalidWindow.category(), ErrorCategory::Validation);
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::Infrastructure);
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::DuplicateCycleName), "DUPLICATE_CYCLE_NAME");
        assert_eq!(format!("{}", ErrorCode::InternalError), "INTERNAL_ERROR");
    }
}
