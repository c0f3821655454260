//! # Add-To-Order Reservation Flow
//!
//! The I/O half of the stock reservation check: one snapshot read, the
//! pure sufficiency check from cafe-core, then sequential per-ingredient
//! deduction writes.
//!
//! ## Attempt State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Add-To-Order Attempt States                            │
//! │                                                                         │
//! │  Idle ──► Checking ──┬──► Sufficient ──► Deducting ──► Committed        │
//! │              │       │                      │                           │
//! │              │       └──► Insufficient ──► Reported (no mutation)       │
//! │              │                              │                           │
//! │              ▼                              ▼                           │
//! │        read failed:                   write failed:                     │
//! │        abort, no mutation             partial deduction reported,       │
//! │                                       cart NOT updated                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no transaction around read+writes. Two terminals can pass the
//! same check and both deduct; that oversell race is accepted (the real
//! fix is a server-side check-and-deduct, and the backend is external).
//! There is also no automatic retry: every failure surfaces to the caller
//! with enough detail to say which ingredients were already decremented.

use tracing::{debug, info, warn};

use cafe_core::reservation::{
    check_sufficiency, compute_requirements, plan_deduction, Shortage,
};
use cafe_core::types::{Ingredient, Recipe};
use cafe_core::validation::validate_serving_count;
use cafe_core::ValidationError;
use thiserror::Error;

use crate::api::CafeClient;
use crate::error::{ClientError, ClientResult};

// =============================================================================
// Backend Seam
// =============================================================================

/// The two backend operations the reservation flow needs.
///
/// `CafeClient` is the real implementation; tests use an in-memory double
/// so the no-write-on-shortage guarantee can be asserted without HTTP.
pub trait IngredientBackend {
    /// Full stock snapshot read.
    fn list_ingredients(&self) -> impl std::future::Future<Output = ClientResult<Vec<Ingredient>>>;

    /// Full-record overwrite of one ingredient.
    fn update_ingredient(
        &self,
        id: i64,
        record: &Ingredient,
    ) -> impl std::future::Future<Output = ClientResult<Ingredient>>;
}

impl IngredientBackend for CafeClient {
    async fn list_ingredients(&self) -> ClientResult<Vec<Ingredient>> {
        CafeClient::list_ingredients(self).await
    }

    async fn update_ingredient(&self, id: i64, record: &Ingredient) -> ClientResult<Ingredient> {
        CafeClient::update_ingredient(self, id, record).await
    }
}

// =============================================================================
// Outcome & Errors
// =============================================================================

/// One stock write that was successfully applied.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedDeduction {
    pub ingredient_id: i64,
    pub name: String,
    pub unit: String,
    pub previous_qty: f64,
    pub new_qty: f64,
}

/// Result of a completed attempt (one that didn't fail on I/O).
#[derive(Debug, Clone, PartialEq)]
pub enum ReservationOutcome {
    /// Every ingredient was available; stock has been decremented and the
    /// caller may add the line to the cart.
    Reserved { deductions: Vec<AppliedDeduction> },

    /// At least one ingredient fell short; nothing was written.
    Insufficient { shortages: Vec<Shortage> },
}

/// Failures of the attempt itself (as opposed to the expected
/// insufficient-stock outcome, which is a [`ReservationOutcome`]).
#[derive(Debug, Error)]
pub enum ReservationError {
    /// Serving count failed validation before any I/O.
    #[error(transparent)]
    InvalidServingCount(#[from] ValidationError),

    /// The snapshot read failed; nothing was written, retry is safe.
    #[error("Failed to read stock snapshot: {0}")]
    SnapshotFailed(#[source] ClientError),

    /// A deduction write failed after earlier writes already succeeded.
    ///
    /// The attempt stops at the first failure, so `applied` lists every
    /// ingredient already decremented and `remaining` the ones never
    /// attempted. The caller must not add the cart line and should show
    /// both lists instead of silently losing them.
    #[error(
        "Stock deduction failed at '{failed_name}' (ingredient {failed_id}): \
         {applied_count} of {total} updates were already applied"
    )]
    DeductionFailed {
        failed_id: i64,
        failed_name: String,
        applied_count: usize,
        total: usize,
        applied: Vec<AppliedDeduction>,
        remaining: Vec<i64>,
        #[source]
        source: ClientError,
    },
}

// =============================================================================
// The Flow
// =============================================================================

/// Runs one add-to-order attempt against the backend.
///
/// Exactly one snapshot read per invocation; deduction writes are issued
/// sequentially, one independent request per ingredient, only after the
/// sufficiency check passed against that same snapshot.
pub async fn reserve_stock<B: IngredientBackend>(
    backend: &B,
    recipe: &Recipe,
    serving_count: i64,
) -> Result<ReservationOutcome, ReservationError> {
    validate_serving_count(serving_count)?;

    let requirements = compute_requirements(recipe, serving_count);
    debug!(
        recipe_id = recipe.id,
        serving_count,
        ingredients = requirements.len(),
        "Checking stock"
    );

    let snapshot = backend
        .list_ingredients()
        .await
        .map_err(ReservationError::SnapshotFailed)?;

    let check = check_sufficiency(&requirements, &snapshot);
    if !check.is_sufficient() {
        info!(
            recipe_id = recipe.id,
            shortages = check.shortages.len(),
            "Insufficient stock, no deduction"
        );
        return Ok(ReservationOutcome::Insufficient {
            shortages: check.shortages,
        });
    }

    let plan = plan_deduction(&requirements, &snapshot);
    let total = plan.len();
    let mut applied = Vec::with_capacity(total);

    for (index, deduction) in plan.iter().enumerate() {
        let id = deduction.ingredient.id;
        debug!(
            ingredient_id = id,
            from = deduction.previous_qty,
            to = deduction.ingredient.stock_qty,
            "Deducting stock"
        );

        if let Err(source) = backend.update_ingredient(id, &deduction.ingredient).await {
            let remaining = plan[index..].iter().map(|d| d.ingredient.id).collect();
            warn!(
                ingredient_id = id,
                applied = applied.len(),
                total,
                "Deduction write failed mid-attempt"
            );
            return Err(ReservationError::DeductionFailed {
                failed_id: id,
                failed_name: deduction.ingredient.name.clone(),
                applied_count: applied.len(),
                total,
                applied,
                remaining,
                source,
            });
        }

        applied.push(AppliedDeduction {
            ingredient_id: id,
            name: deduction.ingredient.name.clone(),
            unit: deduction.ingredient.unit.clone(),
            previous_qty: deduction.previous_qty,
            new_qty: deduction.ingredient.stock_qty,
        });
    }

    info!(
        recipe_id = recipe.id,
        serving_count,
        deductions = applied.len(),
        "Stock reserved"
    );
    Ok(ReservationOutcome::Reserved { deductions: applied })
}

// =============================================================================
// Unit Tests
// =============================================================================
