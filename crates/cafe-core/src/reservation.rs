//! # Stock Reservation Check
//!
//! The pure half of the add-to-order attempt: given a chosen recipe and a
//! serving count, work out how much of each ingredient is needed, compare
//! that against a point-in-time stock snapshot, and produce the deduction
//! plan to persist when everything is available.
//!
//! ## Attempt Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Add-To-Order Attempt                                 │
//! │                                                                         │
//! │  (recipe, serving count)                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  compute_requirements ── per-serving amount × count, duplicates sum     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  check_sufficiency ───── one snapshot, required vs available            │
//! │       │                                                                 │
//! │       ├── shortages ───► report, NO mutation, attempt ends              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  plan_deduction ──────── new qty = max(0, available - required)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  cafe-client writes one update per ingredient, then the cart            │
//! │  gains the line                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Known Race
//! The snapshot read and the subsequent writes are not wrapped in any
//! transaction. Two counters checking the same snapshot can both pass and
//! both deduct; the zero floor keeps stored stock non-negative but the
//! second sale is an oversell. The real fix is a server-side
//! check-and-deduct transaction, which the external backend does not
//! offer today.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{Ingredient, Recipe};

// =============================================================================
// Requirement Map
// =============================================================================

/// Total amount of one ingredient needed for the whole attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    pub ingredient_id: i64,
    pub name: String,
    pub unit: String,
    /// per-serving amount × serving count, duplicate entries summed.
    pub required: f64,
}

/// Request-scoped map from ingredient id to its total requirement.
///
/// A `BTreeMap` keeps iteration order deterministic, so the sequential
/// deduction writes always run in the same ingredient order.
pub type RequirementMap = BTreeMap<i64, Requirement>;

/// Builds the requirement map for one recipe at the given serving count.
///
/// Pure function. `serving_count` must already be validated as a positive
/// integer (see [`crate::validation::validate_serving_count`]); this
/// function does not re-check it.
///
/// An ingredient appearing more than once in the recipe contributes the
/// sum of its entries, not just the last one.
pub fn compute_requirements(recipe: &Recipe, serving_count: i64) -> RequirementMap {
    let mut map = RequirementMap::new();
    for entry in &recipe.ingredients {
        let amount = entry.ingredient_amount * serving_count as f64;
        map.entry(entry.ingredient.id)
            .and_modify(|req| req.required += amount)
            .or_insert_with(|| Requirement {
                ingredient_id: entry.ingredient.id,
                name: entry.ingredient.name.clone(),
                unit: entry.ingredient.unit.clone(),
                required: amount,
            });
    }
    map
}

// =============================================================================
// Sufficiency Check
// =============================================================================

/// An ingredient whose required amount exceeds its available stock.
///
/// Purely informational: shown to the user, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shortage {
    pub ingredient_id: i64,
    pub name: String,
    pub unit: String,
    pub required: f64,
    pub available: f64,
}

/// Result of one sufficiency check.
///
/// Running out of stock is an expected business outcome, so this is a
/// value, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockCheck {
    pub shortages: Vec<Shortage>,
}

impl StockCheck {
    /// True iff every requirement is covered by the snapshot.
    pub fn is_sufficient(&self) -> bool {
        self.shortages.is_empty()
    }
}

/// Compares a requirement map against a stock snapshot.
///
/// An ingredient absent from the snapshot counts as zero available, so it
/// is short whenever anything of it is required. Returns exactly the set
/// of ingredients where required > available.
pub fn check_sufficiency(requirements: &RequirementMap, snapshot: &[Ingredient]) -> StockCheck {
    let shortages = requirements
        .values()
        .filter_map(|req| {
            let available = snapshot
                .iter()
                .find(|i| i.id == req.ingredient_id)
                .map_or(0.0, |i| i.stock_qty);
            if req.required > available {
                Some(Shortage {
                    ingredient_id: req.ingredient_id,
                    name: req.name.clone(),
                    unit: req.unit.clone(),
                    required: req.required,
                    available,
                })
            } else {
                None
            }
        })
        .collect();

    StockCheck { shortages }
}

// =============================================================================
// Deduction Plan
// =============================================================================

/// One planned stock write: the full ingredient record with its new,
/// already-decremented quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct Deduction {
    /// Record to send to the backend, stock already decremented.
    pub ingredient: Ingredient,
    /// Stock level in the snapshot the plan was built from.
    pub previous_qty: f64,
    /// Amount this attempt consumes.
    pub required: f64,
}

/// Builds the per-ingredient deduction plan from a requirement map and the
/// same snapshot the sufficiency check ran against.
///
/// Only call this after [`check_sufficiency`] reported no shortages. The
/// new quantity clamps at zero; with a passing check the clamp is
/// unreachable under sequential use, it only matters if stock moved
/// between read and write.
///
/// Ingredients missing from the snapshot are skipped - there is no record
/// to overwrite, and a passing check guarantees nothing was required of
/// them.
pub fn plan_deduction(requirements: &RequirementMap, snapshot: &[Ingredient]) -> Vec<Deduction> {
    requirements
        .values()
        .filter_map(|req| {
            let current = snapshot.iter().find(|i| i.id == req.ingredient_id)?;
            let mut updated = current.clone();
            updated.stock_qty = (current.stock_qty - req.required).max(0.0);
            Some(Deduction {
                ingredient: updated,
                previous_qty: current.stock_qty,
                required: req.required,
            })
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RecipeIngredient;

    fn ingredient(id: i64, name: &str, stock_qty: f64, unit: &str) -> Ingredient {
        Ingredient {
            id,
            name: name.to_string(),
            stock_qty,
            unit: unit.to_string(),
            location: None,
        }
    }

    fn recipe(entries: Vec<(Ingredient, f64)>) -> Recipe {
        Recipe {
            id: 1,
            sweet_level: "regular".to_string(),
            ingredients: entries
                .into_iter()
                .enumerate()
                .map(|(i, (ing, amount))| RecipeIngredient {
                    id: i as i64 + 1,
                    ingredient: ing,
                    ingredient_amount: amount,
                })
                .collect(),
        }
    }

    #[test]
    fn test_requirements_scale_linearly() {
        let r = recipe(vec![
            (ingredient(1, "Coffee", 5000.0, "g"), 18.0),
            (ingredient(2, "Water", 50000.0, "ml"), 30.0),
        ]);

        let one = compute_requirements(&r, 1);
        let three = compute_requirements(&r, 3);

        for (id, req) in &one {
            assert_eq!(three[id].required, req.required * 3.0);
        }
        assert_eq!(three[&1].required, 54.0);
        assert_eq!(three[&2].required, 90.0);
    }

    #[test]
    fn test_duplicate_ingredient_entries_sum() {
        // Same syrup listed twice in one recipe: 10 + 15 per serving
        let syrup = ingredient(7, "Syrup", 500.0, "ml");
        let r = recipe(vec![(syrup.clone(), 10.0), (syrup, 15.0)]);

        let reqs = compute_requirements(&r, 2);
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[&7].required, 50.0);
    }

    #[test]
    fn test_sufficiency_exact_shortage_set() {
        let r = recipe(vec![
            (ingredient(1, "Coffee", 0.0, "g"), 18.0),
            (ingredient(2, "Milk", 0.0, "ml"), 200.0),
            (ingredient(3, "Water", 0.0, "ml"), 30.0),
        ]);
        let reqs = compute_requirements(&r, 1);

        let snapshot = vec![
            ingredient(1, "Coffee", 100.0, "g"),  // enough
            ingredient(2, "Milk", 150.0, "ml"),   // short
            ingredient(3, "Water", 30.0, "ml"),   // exactly enough
        ];

        let check = check_sufficiency(&reqs, &snapshot);
        assert!(!check.is_sufficient());
        assert_eq!(check.shortages.len(), 1);
        assert_eq!(check.shortages[0].ingredient_id, 2);
        assert_eq!(check.shortages[0].required, 200.0);
        assert_eq!(check.shortages[0].available, 150.0);
    }

    #[test]
    fn test_missing_ingredient_counts_as_zero_available() {
        let r = recipe(vec![(ingredient(42, "Matcha", 0.0, "g"), 5.0)]);
        let reqs = compute_requirements(&r, 1);

        let check = check_sufficiency(&reqs, &[]);
        assert_eq!(check.shortages.len(), 1);
        assert_eq!(check.shortages[0].available, 0.0);
    }

    #[test]
    fn test_shortage_scenario_milk() {
        // Recipe needs 200ml milk per serving, snapshot has 150ml
        let r = recipe(vec![(ingredient(1, "Milk", 0.0, "ml"), 200.0)]);
        let reqs = compute_requirements(&r, 1);
        let snapshot = vec![ingredient(1, "Milk", 150.0, "ml")];

        let check = check_sufficiency(&reqs, &snapshot);
        assert_eq!(
            check.shortages,
            vec![Shortage {
                ingredient_id: 1,
                name: "Milk".to_string(),
                unit: "ml".to_string(),
                required: 200.0,
                available: 150.0,
            }]
        );
        // A failed check never reaches plan_deduction in the real flow;
        // nothing else to assert here.
    }

    #[test]
    fn test_deduction_scenario_coffee_and_water() {
        let r = recipe(vec![
            (ingredient(1, "Coffee", 0.0, "g"), 18.0),
            (ingredient(2, "Water", 0.0, "ml"), 30.0),
        ]);
        let reqs = compute_requirements(&r, 3);
        let snapshot = vec![
            ingredient(1, "Coffee", 5000.0, "g"),
            ingredient(2, "Water", 50000.0, "ml"),
        ];

        assert!(check_sufficiency(&reqs, &snapshot).is_sufficient());

        let plan = plan_deduction(&reqs, &snapshot);
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].ingredient.id, 1);
        assert_eq!(plan[0].ingredient.stock_qty, 4946.0);
        assert_eq!(plan[0].previous_qty, 5000.0);
        assert_eq!(plan[1].ingredient.id, 2);
        assert_eq!(plan[1].ingredient.stock_qty, 49910.0);
    }

    #[test]
    fn test_deduction_touches_only_required_ingredients() {
        let r = recipe(vec![(ingredient(1, "Coffee", 0.0, "g"), 18.0)]);
        let reqs = compute_requirements(&r, 1);
        let snapshot = vec![
            ingredient(1, "Coffee", 100.0, "g"),
            ingredient(2, "Milk", 500.0, "ml"),
        ];

        let plan = plan_deduction(&reqs, &snapshot);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].ingredient.id, 1);
    }

    #[test]
    fn test_deduction_clamps_to_zero_floor() {
        // Stock moved between read and write: plan built from a stale
        // snapshot must still never go negative.
        let r = recipe(vec![(ingredient(1, "Milk", 0.0, "ml"), 200.0)]);
        let reqs = compute_requirements(&r, 1);
        let stale_snapshot = vec![ingredient(1, "Milk", 120.0, "ml")];

        let plan = plan_deduction(&reqs, &stale_snapshot);
        assert_eq!(plan[0].ingredient.stock_qty, 0.0);
    }

    #[test]
    fn test_full_record_preserved_in_deduction() {
        let mut milk = ingredient(1, "Milk", 300.0, "ml");
        milk.location = Some(crate::types::Location {
            id: 2,
            location: "fridge".to_string(),
        });
        let r = recipe(vec![(milk.clone(), 100.0)]);
        let reqs = compute_requirements(&r, 1);

        let plan = plan_deduction(&reqs, &[milk.clone()]);
        // Full-record overwrite: everything except stock_qty is unchanged
        assert_eq!(plan[0].ingredient.name, milk.name);
        assert_eq!(plan[0].ingredient.location, milk.location);
        assert_eq!(plan[0].ingredient.stock_qty, 200.0);
    }
}
