//! # App Error Type
//!
//! One error enum folding everything a command can fail with. The CLI
//! prints the message and the source chain and exits non-zero; there is
//! no serialization layer, so no error codes.

use thiserror::Error;

use cafe_client::{ClientError, ReservationError};
use cafe_core::CoreError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Reservation(#[from] ReservationError),

    /// A --recipe argument did not match the expected shape.
    #[error("Invalid recipe '{0}', expected \"label:ingredientId=amount,...\"")]
    InvalidRecipeSpec(String),

    /// Reading or writing the local cart file failed.
    #[error("Cart file error: {0}")]
    CartFile(String),

    /// No usable data directory on this platform.
    #[error("Could not determine a data directory for the cart file")]
    NoDataDir,
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::CartFile(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::CartFile(err.to_string())
    }
}
