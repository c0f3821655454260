//! `stock` subcommands: ingredient stock levels and registration.

use cafe_client::CafeClient;
use cafe_core::types::{CreateIngredientRequest, NewLocation};
use cafe_core::validation::{validate_name, validate_stock_qty, validate_unit};
use cafe_core::CoreError;

use crate::error::AppError;

pub async fn list(client: &CafeClient) -> Result<(), AppError> {
    let mut ingredients = client.list_ingredients().await?;
    if ingredients.is_empty() {
        println!("No ingredients.");
        return Ok(());
    }
    ingredients.sort_by_key(|i| i.id);

    println!(
        "{:>5}  {:<24} {:>12} {:<6} {}",
        "ID", "NAME", "STOCK", "UNIT", "LOCATION"
    );
    for ing in &ingredients {
        let location = ing
            .location
            .as_ref()
            .map(|l| l.location.as_str())
            .unwrap_or("-");
        println!(
            "{:>5}  {:<24} {:>12.1} {:<6} {}",
            ing.id, ing.name, ing.stock_qty, ing.unit, location
        );
    }
    Ok(())
}

pub async fn add(
    client: &CafeClient,
    name: &str,
    qty: f64,
    unit: &str,
    location: Option<&str>,
) -> Result<(), AppError> {
    validate_name(name).map_err(CoreError::from)?;
    validate_stock_qty(qty).map_err(CoreError::from)?;
    validate_unit(unit).map_err(CoreError::from)?;

    let request = CreateIngredientRequest {
        name: name.to_string(),
        stock_qty: qty,
        unit: unit.to_string(),
        location: location.map(|l| NewLocation {
            location: l.to_string(),
        }),
    };
    let created = client.create_ingredient(&request).await?;

    println!(
        "Registered '{}' (ingredient {}) with {:.1} {}",
        created.name, created.id, created.stock_qty, created.unit
    );
    Ok(())
}
