//! # Order Cart
//!
//! The in-memory cart for the order being assembled at the counter.
//!
//! The cart is an explicit owned value with a single writer: the app holds
//! it (behind a mutex or a file store) and passes it by reference to
//! whatever needs to read it. Nothing reaches into it through an
//! imperative handle.
//!
//! ## Invariants
//! - Lines are unique by (menu id, recipe id); adding the same pair again
//!   merges serving counts
//! - Serving count is always > 0 (an update to 0 removes the line)
//! - Maximum lines and serving count are capped (see crate constants)
//! - The cart only changes after a successful stock reservation; a failed
//!   or abandoned attempt leaves it untouched

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{CreateOrderRequest, IdRef, Menu, NewOrderItem, Recipe};
use crate::{MAX_CART_LINES, MAX_SERVING_COUNT};

/// One line in the cart: a menu item made with a specific recipe variant.
///
/// ## Design Notes
/// Name, variant label, and price are frozen at the time of adding so the
/// cart displays consistent data even if the menu is edited on the backend
/// afterwards. Only the ids go into the final order request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub menu_id: i64,
    pub recipe_id: i64,

    /// Menu name at time of adding (frozen).
    pub menu_name: String,

    /// Recipe variant label at time of adding (frozen).
    pub sweet_level: String,

    /// Price per serving at time of adding (frozen).
    pub unit_price: f64,

    /// Number of servings of this line.
    pub serving_count: i64,

    /// When this line was first added.
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Line total: unit price × serving count.
    pub fn line_total(&self) -> f64 {
        self.unit_price * self.serving_count as f64
    }
}

/// The order cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub lines: Vec<CartLine>,

    /// When the cart was created/last cleared.
    pub created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            created_at: Utc::now(),
        }
    }

    fn find_mut(&mut self, menu_id: i64, recipe_id: i64) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|l| l.menu_id == menu_id && l.recipe_id == recipe_id)
    }

    /// Adds a (menu, recipe) line or merges into an existing one.
    ///
    /// ## Behavior
    /// - Same (menu id, recipe id) already in cart: serving counts add up
    /// - Otherwise: a new line with frozen name/label/price
    pub fn add_line(&mut self, menu: &Menu, recipe: &Recipe, serving_count: i64) -> CoreResult<()> {
        if let Some(line) = self.find_mut(menu.id, recipe.id) {
            let new_count = line.serving_count + serving_count;
            if new_count > MAX_SERVING_COUNT {
                return Err(CoreError::ServingCountTooLarge {
                    requested: new_count,
                    max: MAX_SERVING_COUNT,
                });
            }
            line.serving_count = new_count;
            return Ok(());
        }

        if self.lines.len() >= MAX_CART_LINES {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_LINES,
            });
        }
        if serving_count > MAX_SERVING_COUNT {
            return Err(CoreError::ServingCountTooLarge {
                requested: serving_count,
                max: MAX_SERVING_COUNT,
            });
        }

        self.lines.push(CartLine {
            menu_id: menu.id,
            recipe_id: recipe.id,
            menu_name: menu.name.clone(),
            sweet_level: recipe.sweet_level.clone(),
            unit_price: menu.price,
            serving_count,
            added_at: Utc::now(),
        });
        Ok(())
    }

    /// Sets the serving count of a line.
    ///
    /// ## Behavior
    /// - Count below 1 removes the line (matching the counter UI's
    ///   decrement-to-remove behavior)
    /// - Unknown (menu, recipe) pair: error
    pub fn update_serving_count(
        &mut self,
        menu_id: i64,
        recipe_id: i64,
        serving_count: i64,
    ) -> CoreResult<()> {
        if serving_count < 1 {
            return self.remove_line(menu_id, recipe_id);
        }
        if serving_count > MAX_SERVING_COUNT {
            return Err(CoreError::ServingCountTooLarge {
                requested: serving_count,
                max: MAX_SERVING_COUNT,
            });
        }

        match self.find_mut(menu_id, recipe_id) {
            Some(line) => {
                line.serving_count = serving_count;
                Ok(())
            }
            None => Err(CoreError::LineNotFound { menu_id, recipe_id }),
        }
    }

    /// Removes a line by its (menu id, recipe id) key.
    pub fn remove_line(&mut self, menu_id: i64, recipe_id: i64) -> CoreResult<()> {
        let initial_len = self.lines.len();
        self.lines
            .retain(|l| !(l.menu_id == menu_id && l.recipe_id == recipe_id));

        if self.lines.len() == initial_len {
            Err(CoreError::LineNotFound { menu_id, recipe_id })
        } else {
            Ok(())
        }
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.created_at = Utc::now();
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total servings across all lines.
    pub fn total_servings(&self) -> i64 {
        self.lines.iter().map(|l| l.serving_count).sum()
    }

    /// Total price of the cart.
    pub fn total_price(&self) -> f64 {
        self.lines.iter().map(|l| l.line_total()).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Builds the backend order request from the cart.
    ///
    /// Lines are already unique by (menu id, recipe id), so the grouping
    /// the backend expects falls out directly.
    pub fn to_order_request(&self) -> CoreResult<CreateOrderRequest> {
        if self.is_empty() {
            return Err(CoreError::EmptyCart);
        }
        Ok(CreateOrderRequest {
            order_items: self
                .lines
                .iter()
                .map(|l| NewOrderItem {
                    qty: l.serving_count,
                    menu: IdRef { id: l.menu_id },
                    recipe: IdRef { id: l.recipe_id },
                })
                .collect(),
        })
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

/// Cart totals summary for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub total_servings: i64,
    pub total_price: f64,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            total_servings: cart.total_servings(),
            total_price: cart.total_price(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn latte() -> Menu {
        Menu {
            id: 3,
            name: "Latte".to_string(),
            price: 55.0,
            recipe: vec![regular(), less_sweet()],
        }
    }

    fn regular() -> Recipe {
        Recipe {
            id: 10,
            sweet_level: "regular".to_string(),
            ingredients: vec![],
        }
    }

    fn less_sweet() -> Recipe {
        Recipe {
            id: 11,
            sweet_level: "less sweet".to_string(),
            ingredients: vec![],
        }
    }

    #[test]
    fn test_add_line() {
        let mut cart = Cart::new();
        cart.add_line(&latte(), &regular(), 2).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_servings(), 2);
        assert_eq!(cart.total_price(), 110.0);
    }

    #[test]
    fn test_same_menu_and_recipe_merges() {
        let mut cart = Cart::new();
        cart.add_line(&latte(), &regular(), 2).unwrap();
        cart.add_line(&latte(), &regular(), 3).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_servings(), 5);
    }

    #[test]
    fn test_same_menu_different_recipe_is_a_new_line() {
        let mut cart = Cart::new();
        cart.add_line(&latte(), &regular(), 1).unwrap();
        cart.add_line(&latte(), &less_sweet(), 1).unwrap();

        assert_eq!(cart.line_count(), 2);
    }

    #[test]
    fn test_update_to_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add_line(&latte(), &regular(), 2).unwrap();
        cart.update_serving_count(3, 10, 0).unwrap();

        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_unknown_line_errors() {
        let mut cart = Cart::new();
        let err = cart.remove_line(3, 10).unwrap_err();
        assert!(matches!(err, CoreError::LineNotFound { .. }));
    }

    #[test]
    fn test_serving_count_cap() {
        let mut cart = Cart::new();
        cart.add_line(&latte(), &regular(), 998).unwrap();
        let err = cart.add_line(&latte(), &regular(), 2).unwrap_err();
        assert!(matches!(err, CoreError::ServingCountTooLarge { .. }));
    }

    #[test]
    fn test_order_request_from_cart() {
        let mut cart = Cart::new();
        cart.add_line(&latte(), &regular(), 3).unwrap();
        cart.add_line(&latte(), &less_sweet(), 1).unwrap();

        let req = cart.to_order_request().unwrap();
        assert_eq!(req.order_items.len(), 2);
        assert_eq!(req.order_items[0].qty, 3);
        assert_eq!(req.order_items[0].menu.id, 3);
        assert_eq!(req.order_items[0].recipe.id, 10);
    }

    #[test]
    fn test_order_request_from_empty_cart_errors() {
        let cart = Cart::new();
        assert!(matches!(
            cart.to_order_request().unwrap_err(),
            CoreError::EmptyCart
        ));
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_line(&latte(), &regular(), 2).unwrap();
        cart.clear();
        assert!(cart.is_empty());
    }
}
