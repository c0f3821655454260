//! # Domain Types
//!
//! Core domain types used throughout Cafe POS. They double as the wire
//! types for the external backend, so every struct serializes to the
//! camelCase JSON the backend speaks.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   Ingredient    │   │     Recipe      │   │      Menu       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  name           │   │  sweet_level    │   │  name           │       │
//! │  │  stock_qty      │   │  ingredients ───┼──►│  price          │       │
//! │  │  unit, location │   │  (amount each)  │   │  recipe[]       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │     Order       │   │   OrderItem     │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  id             │   │  qty            │                             │
//! │  │  created_at     │   │  menu?          │                             │
//! │  │  order_items[]  │   │  recipe?        │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Ids are plain integers assigned by the backend. Stock quantities and
//! per-serving amounts are fractional (ml/g), so they stay `f64` at this
//! contract boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Ingredient
// =============================================================================

/// A storage location for an ingredient (fridge, shelf, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: i64,
    pub location: String,
}

/// A stocked ingredient.
///
/// `stock_qty` is the only field this repository ever mutates, and only
/// through the reservation flow (full-record overwrite per the backend
/// contract).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    /// Backend-assigned identifier.
    pub id: i64,

    /// Display name shown at the counter.
    pub name: String,

    /// Current stock level, never negative.
    pub stock_qty: f64,

    /// Unit of measure (ml, g, ...).
    pub unit: String,

    /// Optional storage location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

// =============================================================================
// Recipe
// =============================================================================

/// One ingredient entry in a recipe: which ingredient and how much of it
/// goes into a single serving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredient {
    pub id: i64,
    pub ingredient: Ingredient,
    /// Amount consumed per single serving, in the ingredient's unit.
    pub ingredient_amount: f64,
}

/// A named ingredient-composition variant of a menu item.
///
/// `sweet_level` is the variant label ("less sweet", "extra espresso", ...).
/// This crate only ever reads recipe composition, never changes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: i64,
    pub sweet_level: String,
    pub ingredients: Vec<RecipeIngredient>,
}

// =============================================================================
// Menu
// =============================================================================

/// A menu item with its possible recipe variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    pub id: i64,
    pub name: String,
    /// Price per serving. The backend sends fractional currency values.
    pub price: f64,
    /// Every recipe variant this menu can be made with.
    #[serde(default)]
    pub recipe: Vec<Recipe>,
}

impl Menu {
    /// Looks up one of this menu's recipe variants by id.
    pub fn recipe_by_id(&self, recipe_id: i64) -> Option<&Recipe> {
        self.recipe.iter().find(|r| r.id == recipe_id)
    }
}

// =============================================================================
// Order
// =============================================================================

/// A line item inside a placed order.
///
/// Older backend responses omit `menu` and `recipe`, so both are optional
/// and display code falls back gracefully.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: i64,
    pub qty: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu: Option<Menu>,
    /// The recipe variant that was actually chosen for this line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe: Option<Recipe>,
}

impl OrderItem {
    /// Line total: menu price × quantity. Zero when the menu is missing
    /// from an old response.
    pub fn line_total(&self) -> f64 {
        self.menu.as_ref().map_or(0.0, |m| m.price) * self.qty as f64
    }

    /// The label of the chosen recipe variant.
    ///
    /// Fallback order:
    /// 1. the item's own `recipe` field,
    /// 2. the menu's single recipe if the menu has exactly one,
    /// 3. `None`.
    pub fn chosen_recipe_label(&self) -> Option<&str> {
        if let Some(recipe) = &self.recipe {
            return Some(&recipe.sweet_level);
        }
        match self.menu.as_ref().map(|m| m.recipe.as_slice()) {
            Some([only]) => Some(&only.sweet_level),
            _ => None,
        }
    }
}

/// A placed order as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub order_items: Vec<OrderItem>,
}

impl Order {
    /// Sum of all line totals.
    pub fn total_price(&self) -> f64 {
        self.order_items.iter().map(|i| i.line_total()).sum()
    }

    /// Total number of servings across all lines.
    pub fn total_servings(&self) -> i64 {
        self.order_items.iter().map(|i| i.qty).sum()
    }
}

// =============================================================================
// Request Bodies
// =============================================================================

/// Reference-by-id wrapper the backend expects in nested payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdRef {
    pub id: i64,
}

/// Body for creating an ingredient.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIngredientRequest {
    pub name: String,
    pub stock_qty: f64,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<NewLocation>,
}

/// Location payload nested inside a create-ingredient request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLocation {
    pub location: String,
}

/// Body for creating a menu with its recipe variants in one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMenuRequest {
    pub name: String,
    pub price: f64,
    pub recipe: Vec<NewRecipe>,
}

/// One recipe variant inside a create-menu request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipe {
    pub sweet_level: String,
    pub ingredients: Vec<NewRecipeIngredient>,
}

/// One ingredient entry inside a new recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipeIngredient {
    pub ingredient_amount: f64,
    pub ingredient: IdRef,
}

/// Body for placing an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub order_items: Vec<NewOrderItem>,
}

/// One line inside a create-order request. The chosen recipe is mandatory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderItem {
    pub qty: i64,
    pub menu: IdRef,
    pub recipe: IdRef,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn milk() -> Ingredient {
        Ingredient {
            id: 1,
            name: "Milk".to_string(),
            stock_qty: 1000.0,
            unit: "ml".to_string(),
            location: None,
        }
    }

    #[test]
    fn test_ingredient_wire_format() {
        let json = r#"{"id":1,"name":"Milk","stockQty":1000.0,"unit":"ml"}"#;
        let ing: Ingredient = serde_json::from_str(json).unwrap();
        assert_eq!(ing, milk());

        let back = serde_json::to_value(&ing).unwrap();
        assert_eq!(back["stockQty"], 1000.0);
        // Absent location must not serialize as null
        assert!(back.get("location").is_none());
    }

    #[test]
    fn test_order_wire_format_tolerates_missing_menu() {
        let json = r#"{
            "id": 7,
            "createdAt": "2025-11-02T09:30:00Z",
            "orderItems": [{"id": 1, "qty": 2}]
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.order_items[0].qty, 2);
        assert!(order.order_items[0].menu.is_none());
        assert_eq!(order.total_price(), 0.0);
        assert_eq!(order.total_servings(), 2);
    }

    #[test]
    fn test_order_totals() {
        let menu = Menu {
            id: 3,
            name: "Latte".to_string(),
            price: 55.0,
            recipe: vec![],
        };
        let order = Order {
            id: 1,
            created_at: Utc::now(),
            order_items: vec![
                OrderItem {
                    id: 1,
                    qty: 2,
                    menu: Some(menu.clone()),
                    recipe: None,
                },
                OrderItem {
                    id: 2,
                    qty: 1,
                    menu: Some(menu),
                    recipe: None,
                },
            ],
        };
        assert_eq!(order.total_price(), 165.0);
        assert_eq!(order.total_servings(), 3);
    }

    #[test]
    fn test_chosen_recipe_label_fallbacks() {
        let recipe = Recipe {
            id: 9,
            sweet_level: "less sweet".to_string(),
            ingredients: vec![],
        };
        let menu_one_recipe = Menu {
            id: 3,
            name: "Latte".to_string(),
            price: 55.0,
            recipe: vec![recipe.clone()],
        };

        // Explicit recipe wins
        let item = OrderItem {
            id: 1,
            qty: 1,
            menu: None,
            recipe: Some(recipe),
        };
        assert_eq!(item.chosen_recipe_label(), Some("less sweet"));

        // Single-recipe menu is an acceptable fallback
        let item = OrderItem {
            id: 2,
            qty: 1,
            menu: Some(menu_one_recipe.clone()),
            recipe: None,
        };
        assert_eq!(item.chosen_recipe_label(), Some("less sweet"));

        // Ambiguous menu gives no label
        let mut ambiguous = menu_one_recipe;
        ambiguous.recipe.push(Recipe {
            id: 10,
            sweet_level: "extra sweet".to_string(),
            ingredients: vec![],
        });
        let item = OrderItem {
            id: 3,
            qty: 1,
            menu: Some(ambiguous),
            recipe: None,
        };
        assert_eq!(item.chosen_recipe_label(), None);
    }

    #[test]
    fn test_create_order_request_wire_format() {
        let req = CreateOrderRequest {
            order_items: vec![NewOrderItem {
                qty: 3,
                menu: IdRef { id: 5 },
                recipe: IdRef { id: 11 },
            }],
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["orderItems"][0]["qty"], 3);
        assert_eq!(json["orderItems"][0]["menu"]["id"], 5);
        assert_eq!(json["orderItems"][0]["recipe"]["id"], 11);
    }
}
