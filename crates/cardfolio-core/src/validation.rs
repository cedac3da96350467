//! # Validation Module
//!
//! Field validation rules for Cardfolio requests.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                       │
//! │  ├── Type checks (numbers are numbers, dates parse)                     │
//! │  └── Malformed payloads never reach the rules below                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - field rules                                     │
//! │  ├── Required fields, length bounds, numeric ranges                     │
//! │  └── All failures collected so the client sees every bad field at once  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                             │
//! │  ├── NOT NULL / CHECK constraints                                       │
//! │  └── Foreign key constraints                                            │
//! │                                                                         │
//! │  Defense in depth: a rejected request is never partially applied        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;

use crate::error::{ValidationError, ValidationResult};
use crate::price::{Price, PriceError};
use crate::MAX_PER_PAGE;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required text field: non-empty after trimming, at most `max`
/// characters.
pub fn validate_required_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    validate_max_length(field, value, max)
}

/// Validates an optional text field: at most `max` characters when present.
pub fn validate_optional_text(
    field: &str,
    value: Option<&str>,
    max: usize,
) -> ValidationResult<()> {
    match value {
        Some(text) => validate_max_length(field, text, max),
        None => Ok(()),
    }
}

fn validate_max_length(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a search query string.
///
/// ## Rules
/// - Must not be empty (searching for nothing is a client error, rejected
///   before the store is touched)
pub fn validate_search_query(query: &str) -> ValidationResult<()> {
    if query.is_empty() {
        return Err(ValidationError::Required {
            field: "q".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price decimal: non-negative with at most two decimal places.
pub fn validate_price(field: &str, value: Decimal) -> ValidationResult<()> {
    match Price::try_from_decimal(value) {
        Ok(_) => Ok(()),
        Err(PriceError::Negative) => Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        }),
        Err(err) => Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: err.to_string(),
        }),
    }
}

/// Validates an alias search weight (1-10).
pub fn validate_search_weight(weight: i64) -> ValidationResult<()> {
    if !(1..=10).contains(&weight) {
        return Err(ValidationError::OutOfRange {
            field: "search_weight".to_string(),
            min: 1,
            max: 10,
        });
    }

    Ok(())
}

/// Validates a page number (>= 1).
pub fn validate_page(page: i64) -> ValidationResult<()> {
    if page < 1 {
        return Err(ValidationError::OutOfRange {
            field: "page".to_string(),
            min: 1,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a page size (1-100).
pub fn validate_per_page(per_page: i64) -> ValidationResult<()> {
    if !(1..=MAX_PER_PAGE).contains(&per_page) {
        return Err(ValidationError::OutOfRange {
            field: "per_page".to_string(),
            min: 1,
            max: MAX_PER_PAGE,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
