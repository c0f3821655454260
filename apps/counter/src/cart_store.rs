//! # Cart Store
//!
//! The cart persisted between CLI invocations as a JSON file in the user
//! data directory. This process is the single writer: commands load the
//! cart, mutate the owned value through `cafe_core::Cart`, and save it
//! back. Nothing else touches the file.
//!
//! A failed or abandoned add-to-order attempt never reaches `save`, so
//! the file can never contain a line whose stock was not reserved.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use cafe_core::Cart;

use crate::error::AppError;

pub struct CartStore {
    path: PathBuf,
}

impl CartStore {
    /// Opens the store at the platform's data directory
    /// (e.g. `~/.local/share/cafe-pos/cart.json` on Linux).
    pub fn open_default() -> Result<Self, AppError> {
        let dirs = ProjectDirs::from("com", "cafe", "cafe-pos").ok_or(AppError::NoDataDir)?;
        Ok(CartStore {
            path: dirs.data_dir().join("cart.json"),
        })
    }

    /// Opens the store at an explicit path (used by tests).
    pub fn at(path: impl Into<PathBuf>) -> Self {
        CartStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the cart; a missing file is an empty cart.
    pub fn load(&self) -> Result<Cart, AppError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No cart file, starting empty");
            return Ok(Cart::new());
        }
        let raw = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Saves the cart, creating parent directories on first use.
    pub fn save(&self, cart: &Cart) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(cart)?;
        std::fs::write(&self.path, raw)?;
        debug!(path = %self.path.display(), lines = cart.line_count(), "Saved cart");
        Ok(())
    }

    /// Replaces the cart with a fresh empty one (after checkout).
    pub fn clear(&self) -> Result<(), AppError> {
        self.save(&Cart::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cafe_core::types::{Menu, Recipe};

    fn latte() -> (Menu, Recipe) {
        let recipe = Recipe {
            id: 10,
            sweet_level: "regular".to_string(),
            ingredients: vec![],
        };
        let menu = Menu {
            id: 3,
            name: "Latte".to_string(),
            price: 55.0,
            recipe: vec![recipe.clone()],
        };
        (menu, recipe)
    }

    #[test]
    fn test_missing_file_is_empty_cart() {
        let dir = tempfile::tempdir().unwrap();
        let store = CartStore::at(dir.path().join("cart.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let store = CartStore::at(dir.path().join("nested").join("cart.json"));

        let (menu, recipe) = latte();
        let mut cart = Cart::new();
        cart.add_line(&menu, &recipe, 2).unwrap();
        store.save(&cart).unwrap();

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.line_count(), 1);
        assert_eq!(reloaded.total_servings(), 2);
        assert_eq!(reloaded.total_price(), 110.0);
    }

    #[test]
    fn test_clear_leaves_empty_cart() {
        let dir = tempfile::tempdir().unwrap();
        let store = CartStore::at(dir.path().join("cart.json"));

        let (menu, recipe) = latte();
        let mut cart = Cart::new();
        cart.add_line(&menu, &recipe, 1).unwrap();
        store.save(&cart).unwrap();

        store.clear().unwrap();
        assert!(store.load().unwrap().is_empty());
    }
}
