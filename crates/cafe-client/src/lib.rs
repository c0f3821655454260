//! # cafe-client: REST Client for the Cafe Backend
//!
//! This crate owns every HTTP call against the external cafe backend. The
//! backend is an external collaborator: it holds all persistent state
//! (ingredients, menus, orders) and this crate is a thin typed wrapper
//! around its JSON-over-HTTP contract.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     cafe-client Architecture                            │
//! │                                                                         │
//! │  ┌────────────────────────────────────────────────────────────────────┐│
//! │  │                     CafeClient (this crate)                        ││
//! │  │                                                                    ││
//! │  │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────────────┐ ││
//! │  │  │ config       │  │ api          │  │ reservation              │ ││
//! │  │  │              │  │              │  │                          │ ││
//! │  │  │ TOML file    │  │ ingredients  │  │ snapshot → check →       │ ││
//! │  │  │ env override │  │ menus        │  │ sequential deduction     │ ││
//! │  │  │ defaults     │  │ orders       │  │ writes                   │ ││
//! │  │  └──────────────┘  └──────────────┘  └──────────────────────────┘ ││
//! │  └────────────────────────────────────────────────────────────────────┘│
//! │                                 │                                       │
//! │                                 │ JSON over HTTP                        │
//! │                                 ▼                                       │
//! │  ┌────────────────────────────────────────────────────────────────────┐│
//! │  │                 External cafe backend (not ours)                   ││
//! │  │                                                                    ││
//! │  │   /api/gangbung/ingredients │ /menu │ /order │ /orders            ││
//! │  └────────────────────────────────────────────────────────────────────┘│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod reservation;

pub use api::CafeClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use reservation::{
    reserve_stock, AppliedDeduction, IngredientBackend, ReservationError, ReservationOutcome,
};
