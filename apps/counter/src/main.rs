//! # cafe-counter: Terminal Front End
//!
//! Thin orchestration layer over cafe-core and cafe-client: parse a
//! command, make the calls, print the result. All business logic lives in
//! the library crates.

mod cart_store;
mod cli;
mod commands;
mod error;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use cafe_client::{CafeClient, ClientConfig};

use crate::cart_store::CartStore;
use crate::cli::{Cli, Command, MenuCommand, OrderCommand, StockCommand};
use crate::error::AppError;

#[tokio::main]
async fn main() {
    // RUST_LOG controls verbosity; default keeps the terminal quiet
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        error!("{err}");
        eprintln!("error: {err}");
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = ClientConfig::load()?;
    let client = CafeClient::new(&config)?;
    let store = CartStore::open_default()?;

    match cli.command {
        Command::Menu(cmd) => match cmd {
            MenuCommand::List => commands::menu::list(&client).await,
            MenuCommand::Show { menu_id } => commands::menu::show(&client, menu_id).await,
            MenuCommand::Create {
                name,
                price,
                recipe,
            } => commands::menu::create(&client, &name, price, &recipe).await,
        },
        Command::Stock(cmd) => match cmd {
            StockCommand::List => commands::stock::list(&client).await,
            StockCommand::Add {
                name,
                qty,
                unit,
                location,
            } => commands::stock::add(&client, &name, qty, &unit, location.as_deref()).await,
        },
        Command::Order(cmd) => match cmd {
            OrderCommand::Add {
                menu_id,
                recipe_id,
                qty,
            } => commands::order::add(&client, &store, menu_id, recipe_id, qty).await,
            OrderCommand::Cart => commands::order::show_cart(&store),
            OrderCommand::Qty {
                menu_id,
                recipe_id,
                qty,
            } => commands::order::set_qty(&store, menu_id, recipe_id, qty),
            OrderCommand::Remove { menu_id, recipe_id } => {
                commands::order::remove(&store, menu_id, recipe_id)
            }
            OrderCommand::Checkout => commands::order::checkout(&client, &store).await,
            OrderCommand::History => commands::order::history(&client).await,
        },
    }
}
