//! # Error Types
//!
//! Validation error types for cardfolio-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cardfolio-core errors (this file)                                      │
//! │  └── ValidationError  - Input validation failures (per field)           │
//! │                                                                         │
//! │  cardfolio-db errors (separate crate)                                   │
//! │  └── DbError          - Database operation failures                     │
//! │                                                                         │
//! │  API errors (apps/api)                                                  │
//! │  └── ApiError         - What clients see (HTTP status + JSON body)      │
//! │                                                                         │
//! │  Flow: ValidationError → ApiError (422) / DbError → ApiError (404/500)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Every variant carries the offending field name so the API can report
//!    per-field detail
//! 3. Errors are enum variants, never String

use thiserror::Error;

/// Input validation errors.
///
/// These errors occur when a request doesn't meet field requirements.
/// Validation runs before any persistence interaction, so a rejected request
/// is never partially applied.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., a price with three decimal places).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// The name of the field the error refers to.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::TooLong {
            field: "alias".to_string(),
            max: 255,
        };
        assert_eq!(err.to_string(), "alias must be at most 255 characters");

        let err = ValidationError::OutOfRange {
            field: "search_weight".to_string(),
            min: 1,
            max: 10,
        };
        assert_eq!(err.to_string(), "search_weight must be between 1 and 10");
    }

    #[test]
    fn test_field_accessor() {
        let err = ValidationError::OutOfRange {
            field: "per_page".to_string(),
            min: 1,
            max: 100,
        };
        assert_eq!(err.field(), "per_page");
    }
}
