//! # Error Types
//!
//! Domain-specific error types for stockroom-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockroom-core errors (this file)                                     │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  stockroom-db errors (separate crate)                                  │
//! │  └── DbError          - Connection / query / commit / lookup failures  │
//! │                                                                         │
//! │  Flow: ValidationError → DbError::Validation → caller                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Input validation errors.
///
/// Raised before any statement reaches the database, so a validation
/// failure never leaves a half-written record behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., an email without `@`).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Arithmetic on the value leaves the representable range.
    #[error("{field} is out of range")]
    Overflow { field: String },
}

impl ValidationError {
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    pub fn overflow(field: impl Into<String>) -> Self {
        ValidationError::Overflow {
            field: field.into(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::required("name");
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        };
        assert_eq!(err.to_string(), "name must be at most 200 characters");

        let err = ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        };
        assert_eq!(err.to_string(), "price must not be negative");

        let err = ValidationError::overflow("revenue");
        assert_eq!(err.to_string(), "revenue is out of range");
    }
}
