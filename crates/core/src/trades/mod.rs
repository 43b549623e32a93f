//! Trades module - domain models, service, and traits.

mod trades_constants;
mod trades_model;
mod trades_service;
mod trades_traits;

#[cfg(test)]
mod trades_model_tests;

#[cfg(test)]
mod trades_service_tests;

// Re-export the public interface
pub use trades_constants::*;
pub use trades_model::{normalize_symbol, NewTrade, Trade, TradeFilter, TradeUpdate};
pub use trades_service::TradeService;
pub use trades_traits::TradeServiceTrait;
