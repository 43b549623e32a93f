//! Stockfolio Core - domain models, resource services, and session state.
//!
//! This crate is the typed surface over the remote portfolio backend. It
//! holds no business logic for valuation or profit/loss - the backend
//! computes every derived figure; services here fetch, validate input,
//! and submit the editable subset of each record.

pub mod constants;
pub mod errors;
pub mod portfolios;
pub mod session;
pub mod trades;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
