//! # Command-Line Interface
//!
//! Subcommands map one-to-one onto the counter workflows:
//!
//! ```text
//! cafe-counter menu  list                             browse the menu
//! cafe-counter menu  show <MENU_ID>                   recipes + composition
//! cafe-counter menu  create <NAME> <PRICE> --recipe   register a menu
//! cafe-counter stock list                             ingredient stock levels
//! cafe-counter stock add <NAME> <QTY> <UNIT>          register an ingredient
//! cafe-counter order add <MENU_ID> <RECIPE_ID>        reserve stock, add to cart
//! cafe-counter order cart                             review the cart
//! cafe-counter order qty <MENU_ID> <RECIPE_ID> <QTY>  change a line's servings
//! cafe-counter order remove <MENU_ID> <RECIPE_ID>     drop a cart line
//! cafe-counter order checkout                         place the order
//! cafe-counter order history                          past orders, newest first
//! ```

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "cafe-counter",
    version,
    about = "Terminal front end for the cafe backend"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse menus and their recipe variants
    #[command(subcommand)]
    Menu(MenuCommand),

    /// Manage ingredient stock
    #[command(subcommand)]
    Stock(StockCommand),

    /// Build and place an order
    #[command(subcommand)]
    Order(OrderCommand),
}

#[derive(Debug, Subcommand)]
pub enum MenuCommand {
    /// List all menus
    List,

    /// Show one menu with its recipe variants and composition
    Show { menu_id: i64 },

    /// Register a menu together with its recipe variants
    Create {
        /// Display name
        name: String,

        /// Price per serving
        price: f64,

        /// Recipe variant as "label:ingredientId=amount,ingredientId=amount";
        /// repeat the flag for more variants
        #[arg(long = "recipe", required = true)]
        recipe: Vec<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum StockCommand {
    /// List all ingredients with current stock
    List,

    /// Register a new ingredient
    Add {
        /// Display name
        name: String,

        /// Initial stock quantity
        qty: f64,

        /// Unit of measure (ml, g, ...)
        unit: String,

        /// Storage location
        #[arg(long)]
        location: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum OrderCommand {
    /// Check stock for a (menu, recipe) choice and add it to the cart
    Add {
        menu_id: i64,

        recipe_id: i64,

        /// Serving count; must be at least 1
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(i64).range(1..=999))]
        qty: i64,
    },

    /// Show the current cart
    Cart,

    /// Set a cart line's serving count; 0 removes the line
    Qty {
        menu_id: i64,

        recipe_id: i64,

        #[arg(value_parser = clap::value_parser!(i64).range(0..=999))]
        qty: i64,
    },

    /// Remove one cart line
    Remove { menu_id: i64, recipe_id: i64 },

    /// Place the order from the cart and clear it
    Checkout,

    /// Show past orders, newest first
    History,
}
