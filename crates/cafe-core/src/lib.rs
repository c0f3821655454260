//! # cafe-core: Pure Business Logic for Cafe POS
//!
//! This crate is the **heart** of Cafe POS. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cafe POS Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Counter App (CLI)                            │   │
//! │  │    menu list ──► order add ──► order checkout ──► history       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                ★ cafe-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌─────────────┐  ┌───────────┐  ┌──────────┐  │   │
//! │  │   │   types   │  │ reservation │  │   cart    │  │validation│  │   │
//! │  │   │ Ingredient│  │ Requirements│  │   Cart    │  │  rules   │  │   │
//! │  │   │ Menu/Order│  │ StockCheck  │  │ CartLine  │  │  checks  │  │   │
//! │  │   └───────────┘  └─────────────┘  └───────────┘  └──────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  cafe-client (REST client)                      │   │
//! │  │       one HTTP call per backend operation, no local state       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types matching the backend contract (Ingredient, Menu, ...)
//! - [`reservation`] - The stock sufficiency check and deduction plan
//! - [`cart`] - The in-memory order cart
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Network and file system access is FORBIDDEN here
//! 3. **Explicit Errors**: All errors are typed, never strings or panics
//! 4. **Shortages Are Values**: running out of milk is an expected business
//!    outcome, not an error - the sufficiency check returns a report

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod reservation;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use cafe_core::Cart` instead of
// `use cafe_core::cart::Cart`

pub use cart::{Cart, CartLine, CartTotals};
pub use error::{CoreError, ValidationError};
pub use reservation::{
    compute_requirements, check_sufficiency, plan_deduction, Deduction, Requirement,
    RequirementMap, Shortage, StockCheck,
};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart.
///
/// ## Business Reason
/// Prevents runaway carts and keeps one order reviewable at the counter.
pub const MAX_CART_LINES: usize = 100;

/// Maximum serving count for a single cart line.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_SERVING_COUNT: i64 = 999;
