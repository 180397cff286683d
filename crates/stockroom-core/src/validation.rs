//! # Validation Module
//!
//! Input validation for records before they are written.
//!
//! ## What Is (and Is Not) Validated
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Coverage                                │
//! │                                                                         │
//! │  Checked here (before the INSERT):                                     │
//! │  ├── product name: non-empty, ≤ 200 chars                              │
//! │  ├── product category: non-empty                                       │
//! │  ├── unit price: ≥ 0                                                   │
//! │  └── supplier name / email: non-empty, email contains '@'              │
//! │                                                                         │
//! │  Deliberately NOT checked (permissive, passed through as given):       │
//! │  ├── sale quantity (zero or negative is recorded)                      │
//! │  ├── discount outside 0-100%                                           │
//! │  └── stock level going negative (backorder)                            │
//! │                                                                         │
//! │  Checked by SQLite:                                                    │
//! │  ├── UNIQUE products.name                                              │
//! │  └── FOREIGN KEY sales.product_id                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest product name accepted.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Example
/// ```rust
/// use stockroom_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Sample Product").is_ok());
/// assert!(validate_product_name("").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required("name"));
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(())
}

pub fn validate_category(category: &str) -> ValidationResult<()> {
    if category.trim().is_empty() {
        return Err(ValidationError::required("category"));
    }
    Ok(())
}

pub fn validate_supplier_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::required("supplier name"));
    }
    Ok(())
}

/// Validates a supplier email.
///
/// Only the shape is checked: something before and after a single `@`.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::required("email"));
    }

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(())
        }
        _ => Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "expected local@domain".to_string(),
        }),
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price.
///
/// Zero is allowed (free items).
///
/// ## Example
/// ```rust
/// use stockroom_core::money::Money;
/// use stockroom_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(9999)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_cents(-1)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
