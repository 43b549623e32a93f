use std::sync::Arc;

use log::debug;

use stockfolio_connect::{fallback, ApiClient, Enveloped, ListEnvelope, Method};

use super::trades_constants::{
    trade_by_symbol_path, trade_path, trades_by_portfolio_id_candidates,
    trades_by_portfolio_name_path, TRADES_PATH,
};
use super::trades_model::{normalize_symbol, NewTrade, Trade, TradeFilter, TradeUpdate};
use super::trades_traits::TradeServiceTrait;
use crate::errors::{Result, ValidationError};
use crate::Error;

/// Service for managing trades on the remote backend.
///
/// Normalizes symbols and validates input, then passes the editable
/// subset straight through; derived figures only ever flow backend-to-client.
pub struct TradeService {
    client: Arc<ApiClient>,
}

impl TradeService {
    /// Creates a new TradeService instance.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl TradeServiceTrait for TradeService {
    async fn list_trades(&self, filter: &TradeFilter) -> Result<Vec<Trade>> {
        let envelope: ListEnvelope<Trade> = match filter {
            TradeFilter::All => self.client.get(TRADES_PATH).await?,
            TradeFilter::PortfolioId(id) => {
                // The filter key differs across backend builds; the
                // resolver tries the canonical key first.
                let candidates = trades_by_portfolio_id_candidates(*id);
                fallback::request_with_fallback(&self.client, Method::GET, &candidates, None)
                    .await?
            }
            TradeFilter::PortfolioName(name) => {
                self.client.get(&trades_by_portfolio_name_path(name)).await?
            }
        };
        debug!("Fetched {} trades ({:?})", envelope.data.len(), filter);
        Ok(envelope.data)
    }

    async fn get_trade(&self, id: i64) -> Result<Trade> {
        let trade: Enveloped<Trade> = self.client.get(&trade_path(id)).await?;
        Ok(trade.into_inner())
    }

    async fn get_trade_by_symbol(&self, symbol: &str) -> Result<Trade> {
        let symbol = normalize_symbol(symbol);
        if symbol.is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "symbol".to_string(),
            )));
        }
        let trade: Enveloped<Trade> = self.client.get(&trade_by_symbol_path(&symbol)).await?;
        Ok(trade.into_inner())
    }

    async fn create_trade(&self, mut new_trade: NewTrade) -> Result<Trade> {
        new_trade.symbol = normalize_symbol(&new_trade.symbol);
        new_trade.validate()?;
        debug!("Creating trade {}...", new_trade.symbol);
        let created: Enveloped<Trade> = self.client.post(TRADES_PATH, &new_trade).await?;
        Ok(created.into_inner())
    }

    async fn update_trade(&self, id: i64, mut update: TradeUpdate) -> Result<Trade> {
        if let Some(symbol) = update.symbol.as_deref() {
            update.symbol = Some(normalize_symbol(symbol));
        }
        update.validate()?;
        if update.is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Nothing to update".to_string(),
            )));
        }
        let updated: Enveloped<Trade> = self.client.patch(&trade_path(id), &update).await?;
        Ok(updated.into_inner())
    }

    async fn delete_trade(&self, id: i64) -> Result<()> {
        debug!("Deleting trade {}...", id);
        self.client
            .delete::<serde_json::Value>(&trade_path(id))
            .await?;
        Ok(())
    }
}
