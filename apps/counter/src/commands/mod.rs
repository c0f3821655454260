//! Command handlers, one module per subcommand group.

pub mod menu;
pub mod order;
pub mod stock;
