//! Trade service trait.

use async_trait::async_trait;

use super::trades_model::{NewTrade, Trade, TradeFilter, TradeUpdate};
use crate::errors::Result;

/// Contract for trade operations against the remote backend.
#[async_trait]
pub trait TradeServiceTrait: Send + Sync {
    /// Lists trades, optionally scoped to one portfolio.
    async fn list_trades(&self, filter: &TradeFilter) -> Result<Vec<Trade>>;

    /// Retrieves a trade by its id.
    async fn get_trade(&self, id: i64) -> Result<Trade>;

    /// Retrieves the aggregated record for a ticker symbol.
    async fn get_trade_by_symbol(&self, symbol: &str) -> Result<Trade>;

    /// Creates a new trade with symbol normalization and validation.
    async fn create_trade(&self, new_trade: NewTrade) -> Result<Trade>;

    /// Partially updates a trade; only populated fields are submitted.
    async fn update_trade(&self, id: i64, update: TradeUpdate) -> Result<Trade>;

    /// Deletes a trade by its id.
    async fn delete_trade(&self, id: i64) -> Result<()>;
}
