//! `order` subcommands: the add-to-order flow, cart review, checkout and
//! history.
//!
//! `add` is where the stock reservation check runs. The new cart line is
//! staged in memory first, so a full cart or an over-cap serving count
//! aborts before any stock is touched; the staged cart is only persisted
//! after the backend deductions all succeeded. An insufficient result
//! prints the shortages and leaves both stock and cart untouched.
//!
//! `qty` edits a cart line in place without re-checking stock, matching
//! the counter workflow where the reservation already happened at `add`
//! time.

use cafe_client::{
    reserve_stock, CafeClient, IngredientBackend, ReservationError, ReservationOutcome,
};
use cafe_core::cart::CartTotals;
use cafe_core::types::{Menu, Recipe};
use cafe_core::CoreError;

use crate::cart_store::CartStore;
use crate::error::AppError;

pub async fn add(
    client: &CafeClient,
    store: &CartStore,
    menu_id: i64,
    recipe_id: i64,
    qty: i64,
) -> Result<(), AppError> {
    let menus = client.list_menus().await?;
    let menu = menus
        .iter()
        .find(|m| m.id == menu_id)
        .ok_or(CoreError::MenuNotFound(menu_id))?;
    let recipe = menu
        .recipe_by_id(recipe_id)
        .ok_or(CoreError::RecipeNotFound { menu_id, recipe_id })?;

    reserve_and_commit(client, store, menu, recipe, qty).await
}

/// The add-to-order attempt after the (menu, recipe) pair is resolved.
///
/// Ordering invariant: the cart line is added to the loaded cart value
/// before the reservation runs, so every cart-capacity error fires while
/// stock is still untouched. The mutated cart is only saved on the
/// `Reserved` path.
async fn reserve_and_commit<B: IngredientBackend>(
    backend: &B,
    store: &CartStore,
    menu: &Menu,
    recipe: &Recipe,
    qty: i64,
) -> Result<(), AppError> {
    let mut cart = store.load()?;
    cart.add_line(menu, recipe, qty)?;

    match reserve_stock(backend, recipe, qty).await {
        Ok(ReservationOutcome::Reserved { deductions }) => {
            store.save(&cart)?;

            println!(
                "Added {} x {} ({}) to the cart.",
                qty, menu.name, recipe.sweet_level
            );
            for d in &deductions {
                println!(
                    "  {:<24} {:>10.1} -> {:>10.1} {}",
                    d.name, d.previous_qty, d.new_qty, d.unit
                );
            }
            let totals = CartTotals::from(&cart);
            println!(
                "Cart: {} line(s), {} serving(s), total {:.2}",
                totals.line_count, totals.total_servings, totals.total_price
            );
            Ok(())
        }
        Ok(ReservationOutcome::Insufficient { shortages }) => {
            println!(
                "Not enough stock for {} x {} ({}):",
                qty, menu.name, recipe.sweet_level
            );
            for s in &shortages {
                println!(
                    "  {:<24} need {:>10.1} {}, have {:>10.1}",
                    s.name, s.required, s.unit, s.available
                );
            }
            println!("Nothing was deducted and the cart is unchanged.");
            Ok(())
        }
        Err(err) => {
            if let ReservationError::DeductionFailed {
                applied, remaining, ..
            } = &err
            {
                eprintln!("Stock is now partially deducted. Already applied:");
                for d in applied {
                    eprintln!(
                        "  {:<24} {:>10.1} -> {:>10.1} {}",
                        d.name, d.previous_qty, d.new_qty, d.unit
                    );
                }
                eprintln!("Never attempted: ingredient ids {:?}", remaining);
                eprintln!("The cart was NOT updated; reconcile stock before retrying.");
            }
            Err(err.into())
        }
    }
}

pub fn show_cart(store: &CartStore) -> Result<(), AppError> {
    let cart = store.load()?;
    if cart.is_empty() {
        println!("The cart is empty.");
        return Ok(());
    }

    println!(
        "{:>5} {:>7}  {:<30} {:<16} {:>5} {:>10}",
        "MENU", "RECIPE", "NAME", "VARIANT", "QTY", "TOTAL"
    );
    for line in &cart.lines {
        println!(
            "{:>5} {:>7}  {:<30} {:<16} {:>5} {:>10.2}",
            line.menu_id,
            line.recipe_id,
            line.menu_name,
            line.sweet_level,
            line.serving_count,
            line.line_total()
        );
    }
    let totals = CartTotals::from(&cart);
    println!(
        "{} line(s), {} serving(s), total {:.2}",
        totals.line_count, totals.total_servings, totals.total_price
    );
    Ok(())
}

pub fn set_qty(
    store: &CartStore,
    menu_id: i64,
    recipe_id: i64,
    qty: i64,
) -> Result<(), AppError> {
    let mut cart = store.load()?;
    cart.update_serving_count(menu_id, recipe_id, qty)?;
    store.save(&cart)?;

    if qty < 1 {
        println!("Removed line (menu {}, recipe {}).", menu_id, recipe_id);
    } else {
        println!(
            "Set (menu {}, recipe {}) to {} serving(s).",
            menu_id, recipe_id, qty
        );
    }
    Ok(())
}

pub fn remove(store: &CartStore, menu_id: i64, recipe_id: i64) -> Result<(), AppError> {
    let mut cart = store.load()?;
    cart.remove_line(menu_id, recipe_id)?;
    store.save(&cart)?;
    println!("Removed line (menu {}, recipe {}).", menu_id, recipe_id);
    Ok(())
}

pub async fn checkout(client: &CafeClient, store: &CartStore) -> Result<(), AppError> {
    let cart = store.load()?;
    let request = cart.to_order_request()?;
    let order = client.create_order(&request).await?;

    // The cart only clears after the backend confirmed the order
    store.clear()?;

    println!(
        "Placed order {} with {} serving(s), total {:.2}",
        order.id,
        order.total_servings(),
        order.total_price()
    );
    Ok(())
}

pub async fn history(client: &CafeClient) -> Result<(), AppError> {
    let mut orders = client.list_orders().await?;
    if orders.is_empty() {
        println!("No orders yet.");
        return Ok(());
    }
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    for order in &orders {
        println!(
            "Order {} at {}  ({} serving(s), total {:.2})",
            order.id,
            order.created_at.format("%Y-%m-%d %H:%M:%S"),
            order.total_servings(),
            order.total_price()
        );
        for item in &order.order_items {
            let name = item
                .menu
                .as_ref()
                .map(|m| m.name.as_str())
                .unwrap_or("(unknown menu)");
            let variant = item.chosen_recipe_label().unwrap_or("-");
            println!("  {:>3} x {:<30} {}", item.qty, name, variant);
        }
    }
    Ok(())
}
