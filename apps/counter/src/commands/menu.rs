//! `menu` subcommands: browse the menu, inspect recipe composition, and
//! register new menus.
//!
//! `create` takes each recipe variant as one `--recipe` argument of the
//! form `label:ingredientId=amount,ingredientId=amount`, e.g.
//! `--recipe "less sweet:1=18,2=30"`.

use cafe_client::CafeClient;
use cafe_core::types::{CreateMenuRequest, IdRef, NewRecipe, NewRecipeIngredient};
use cafe_core::validation::{validate_name, validate_price};
use cafe_core::CoreError;

use crate::error::AppError;

pub async fn list(client: &CafeClient) -> Result<(), AppError> {
    let menus = client.list_menus().await?;
    if menus.is_empty() {
        println!("No menus.");
        return Ok(());
    }

    println!("{:>5}  {:<30} {:>10}  {}", "ID", "NAME", "PRICE", "VARIANTS");
    for menu in &menus {
        println!(
            "{:>5}  {:<30} {:>10.2}  {}",
            menu.id,
            menu.name,
            menu.price,
            menu.recipe.len()
        );
    }
    Ok(())
}

pub async fn show(client: &CafeClient, menu_id: i64) -> Result<(), AppError> {
    let menus = client.list_menus().await?;
    let menu = menus
        .iter()
        .find(|m| m.id == menu_id)
        .ok_or(CoreError::MenuNotFound(menu_id))?;

    println!("{} (menu {}) - {:.2}", menu.name, menu.id, menu.price);
    if menu.recipe.is_empty() {
        println!("  no recipe variants");
        return Ok(());
    }

    for recipe in &menu.recipe {
        println!("  [{}] {}", recipe.id, recipe.sweet_level);
        for entry in &recipe.ingredients {
            println!(
                "      {:<24} {:>8.1} {:<4} per serving  (stock {:.1})",
                entry.ingredient.name,
                entry.ingredient_amount,
                entry.ingredient.unit,
                entry.ingredient.stock_qty
            );
        }
    }
    Ok(())
}

pub async fn create(
    client: &CafeClient,
    name: &str,
    price: f64,
    recipes: &[String],
) -> Result<(), AppError> {
    let request = build_menu_request(name, price, recipes)?;
    let created = client.create_menu(&request).await?;

    println!(
        "Created '{}' (menu {}) at {:.2} with {} recipe variant(s)",
        created.name,
        created.id,
        created.price,
        created.recipe.len()
    );
    Ok(())
}

/// Validates the inputs and assembles the create-menu body.
fn build_menu_request(
    name: &str,
    price: f64,
    recipes: &[String],
) -> Result<CreateMenuRequest, AppError> {
    validate_name(name).map_err(CoreError::from)?;
    validate_price(price).map_err(CoreError::from)?;

    let recipe = recipes
        .iter()
        .map(|spec| parse_recipe_spec(spec))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CreateMenuRequest {
        name: name.to_string(),
        price,
        recipe,
    })
}

/// Parses one `label:ingredientId=amount,...` variant argument.
fn parse_recipe_spec(spec: &str) -> Result<NewRecipe, AppError> {
    let invalid = || AppError::InvalidRecipeSpec(spec.to_string());

    let (label, entries) = spec.split_once(':').ok_or_else(invalid)?;
    let label = label.trim();
    if label.is_empty() {
        return Err(invalid());
    }

    let mut ingredients = Vec::new();
    for entry in entries.split(',') {
        let (id, amount) = entry.split_once('=').ok_or_else(invalid)?;
        let id: i64 = id.trim().parse().map_err(|_| invalid())?;
        let amount: f64 = amount.trim().parse().map_err(|_| invalid())?;
        if amount <= 0.0 {
            return Err(invalid());
        }
        ingredients.push(NewRecipeIngredient {
            ingredient_amount: amount,
            ingredient: IdRef { id },
        });
    }

    Ok(NewRecipe {
        sweet_level: label.to_string(),
        ingredients,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_menu_request() {
        let specs = vec![
            "regular:1=18,2=30".to_string(),
            "less sweet: 1 = 18 , 3 = 5.5".to_string(),
        ];
        let req = build_menu_request("Latte", 55.0, &specs).unwrap();

        assert_eq!(req.name, "Latte");
        assert_eq!(req.price, 55.0);
        assert_eq!(req.recipe.len(), 2);
        assert_eq!(req.recipe[0].sweet_level, "regular");
        assert_eq!(req.recipe[0].ingredients[0].ingredient.id, 1);
        assert_eq!(req.recipe[0].ingredients[0].ingredient_amount, 18.0);
        assert_eq!(req.recipe[1].sweet_level, "less sweet");
        assert_eq!(req.recipe[1].ingredients[1].ingredient_amount, 5.5);
    }

    #[test]
    fn test_build_menu_request_validates_inputs() {
        let specs = vec!["regular:1=18".to_string()];

        let err = build_menu_request("", 55.0, &specs).unwrap_err();
        assert!(matches!(err, AppError::Core(CoreError::Validation(_))));

        let err = build_menu_request("Latte", -1.0, &specs).unwrap_err();
        assert!(matches!(err, AppError::Core(CoreError::Validation(_))));
    }

    #[test]
    fn test_parse_recipe_spec_rejects_malformed_input() {
        for bad in [
            "no-separator",
            ":1=18",
            "regular:",
            "regular:1",
            "regular:one=18",
            "regular:1=lots",
            "regular:1=0",
            "regular:1=-5",
        ] {
            assert!(
                matches!(
                    parse_recipe_spec(bad),
                    Err(AppError::InvalidRecipeSpec(_))
                ),
                "accepted {:?}",
                bad
            );
        }
    }
}
