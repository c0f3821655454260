//! # Error Types
//!
//! Domain-specific error types for cafe-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cafe-core errors (this file)                                          │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  cafe-client errors (separate crate)                                   │
//! │  ├── ClientError      - HTTP/config failures                           │
//! │  └── ReservationError - Add-to-order attempt failures                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → terminal output         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (menu id, recipe id, etc.)
//! 3. Errors are enum variants, never String
//! 4. Insufficient stock is NOT an error - it is an expected business
//!    outcome reported as a [`crate::reservation::StockCheck`] value

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Menu cannot be found in the fetched menu list.
    #[error("Menu not found: {0}")]
    MenuNotFound(i64),

    /// The selected menu has no recipe with the given id.
    ///
    /// ## When This Occurs
    /// - Recipe id from a stale selection after the menu was edited
    /// - Caller mixed up recipe ids across menus
    #[error("Menu {menu_id} has no recipe {recipe_id}")]
    RecipeNotFound { menu_id: i64, recipe_id: i64 },

    /// Cart has exceeded the maximum allowed number of lines.
    #[error("Cart cannot have more than {max} lines")]
    CartTooLarge { max: usize },

    /// Serving count exceeds the maximum allowed.
    #[error("Serving count {requested} exceeds maximum allowed ({max})")]
    ServingCountTooLarge { requested: i64, max: i64 },

    /// The requested cart line does not exist.
    #[error("No cart line for menu {menu_id}, recipe {recipe_id}")]
    LineNotFound { menu_id: i64, recipe_id: i64 },

    /// Checkout was attempted on an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
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

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
