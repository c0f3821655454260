//! # Validation Module
//!
//! Input validation utilities for Cafe POS.
//!
//! Validation runs before business logic: the CLI parses, these functions
//! enforce the business rules, and the backend has the final word.
//!
//! ## Serving Count Policy
//! A serving count of zero or less is REJECTED with a typed error rather
//! than silently clamped to one. A clamp hides caller bugs; a rejection
//! is visible and testable. The CLI additionally enforces `>= 1` at the
//! argument-parsing layer, so a user can never trigger this path from the
//! terminal.

use crate::error::ValidationError;
use crate::MAX_SERVING_COUNT;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a serving count for one add-to-order attempt.
///
/// ## Rules
/// - Must be positive (> 0) - see the module-level policy note
/// - Must not exceed MAX_SERVING_COUNT (999)
pub fn validate_serving_count(count: i64) -> ValidationResult<()> {
    if count <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "serving count".to_string(),
        });
    }

    if count > MAX_SERVING_COUNT {
        return Err(ValidationError::OutOfRange {
            field: "serving count".to_string(),
            min: 1,
            max: MAX_SERVING_COUNT,
        });
    }

    Ok(())
}

/// Validates a menu price.
///
/// ## Rules
/// - Must be non-negative (zero is allowed for promotional items)
pub fn validate_price(price: f64) -> ValidationResult<()> {
    if price < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }
    Ok(())
}

/// Validates an ingredient stock quantity.
///
/// ## Rules
/// - Must be non-negative; the reservation flow keeps it that way and a
///   negative value entered by hand would poison every later check
pub fn validate_stock_qty(qty: f64) -> ValidationResult<()> {
    if qty < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "stock quantity".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a display name (menu or ingredient).
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 200 characters
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a unit of measure.
pub fn validate_unit(unit: &str) -> ValidationResult<()> {
    let unit = unit.trim();

    if unit.is_empty() {
        return Err(ValidationError::Required {
            field: "unit".to_string(),
        });
    }

    if unit.len() > 20 {
        return Err(ValidationError::TooLong {
            field: "unit".to_string(),
            max: 20,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_serving_count() {
        assert!(validate_serving_count(1).is_ok());
        assert!(validate_serving_count(100).is_ok());
        assert!(validate_serving_count(999).is_ok());

        // Rejection policy: zero and negatives are errors, not clamps
        assert!(validate_serving_count(0).is_err());
        assert!(validate_serving_count(-1).is_err());
        assert!(validate_serving_count(1000).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(55.0).is_ok());
        assert!(validate_price(0.0).is_ok());
        assert!(validate_price(-1.0).is_err());
    }

    #[test]
    fn test_validate_stock_qty() {
        assert!(validate_stock_qty(0.0).is_ok());
        assert!(validate_stock_qty(1000.5).is_ok());
        assert!(validate_stock_qty(-0.1).is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Latte").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_unit() {
        assert!(validate_unit("ml").is_ok());
        assert!(validate_unit("").is_err());
        assert!(validate_unit(&"x".repeat(30)).is_err());
    }
}
