//! Core error types for the stockfolio client.
//!
//! Wire-level errors stay in `stockfolio-connect`; this module wraps them
//! together with input validation so every service returns one error type
//! whose `Display` output is already the user-facing message.

use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

use stockfolio_connect::ApiError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the client.
#[derive(Error, Debug)]
pub enum Error {
    /// A backend call failed. The inner error already carries the best
    /// human-readable message (backend detail preferred).
    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Session store error: {0}")]
    TokenStore(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Validation errors for user input and form parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Failed to parse number: {0}")]
    NumberParse(#[from] ParseFloatError),

    #[error("Failed to parse quantity: {0}")]
    QuantityParse(#[from] ParseIntError),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::TokenStore(err.to_string())
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
