//! Trade domain models.
//!
//! A trade splits into two field groups: the editable subset the user may
//! submit, and the derived figures the backend computes. The submission
//! types ([`NewTrade`], [`TradeUpdate`]) only contain the editable subset,
//! so a derived field can never appear in an outbound payload.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{errors::ValidationError, Error, Result};

/// Uppercase/trim a ticker symbol before it goes anywhere near the wire.
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

/// One stock position record as the backend reports it.
///
/// Everything from `total_buy_value` down is computed server-side and is
/// display-only on the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub id: i64,
    pub symbol: String,
    /// Canonical portfolio association.
    #[serde(default, alias = "portfolio")]
    pub portfolio_id: Option<i64>,
    /// Display name of the owning portfolio, when the backend includes it.
    #[serde(default, alias = "current_portfolio")]
    pub portfolio_name: Option<String>,
    #[serde(default)]
    pub total_buy_qty: Option<i64>,
    #[serde(default)]
    pub buy_price: Option<Decimal>,
    #[serde(default)]
    pub total_sell_qty: Option<i64>,
    #[serde(default)]
    pub sell_price: Option<Decimal>,
    #[serde(default)]
    pub wk_52_high: Option<Decimal>,
    #[serde(default)]
    pub wk_52_low: Option<Decimal>,
    // Derived figures, backend-computed.
    #[serde(default)]
    pub total_buy_value: Option<Decimal>,
    #[serde(default)]
    pub total_sell_value: Option<Decimal>,
    #[serde(default)]
    pub balance_qty: Option<i64>,
    #[serde(default)]
    pub acquisition_cost: Option<Decimal>,
    #[serde(default)]
    pub percent_holding: Option<Decimal>,
    #[serde(default)]
    pub current_value: Option<Decimal>,
    #[serde(default)]
    pub realised_profit_loss: Option<Decimal>,
}

/// Client-writable subset for creating a trade.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewTrade {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_buy_qty: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buy_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_sell_qty: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sell_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wk_52_high: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wk_52_low: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio_id: Option<i64>,
}

impl NewTrade {
    /// Validates the new trade data.
    pub fn validate(&self) -> Result<()> {
        if self.symbol.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Trade symbol cannot be empty".to_string(),
            )));
        }
        if self.total_buy_qty.is_some_and(|qty| qty < 0)
            || self.total_sell_qty.is_some_and(|qty| qty < 0)
        {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Quantities cannot be negative".to_string(),
            )));
        }
        Ok(())
    }
}

/// Client-writable subset for a partial trade update.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TradeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_buy_qty: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buy_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_sell_qty: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sell_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wk_52_high: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wk_52_low: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio_id: Option<i64>,
}

impl TradeUpdate {
    /// Validates the trade update data.
    pub fn validate(&self) -> Result<()> {
        if self
            .symbol
            .as_deref()
            .is_some_and(|symbol| symbol.trim().is_empty())
        {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Trade symbol cannot be empty".to_string(),
            )));
        }
        Ok(())
    }

    /// True when no field is populated; the backend rejects empty patches.
    pub fn is_empty(&self) -> bool {
        self.symbol.is_none()
            && self.total_buy_qty.is_none()
            && self.buy_price.is_none()
            && self.total_sell_qty.is_none()
            && self.sell_price.is_none()
            && self.wk_52_high.is_none()
            && self.wk_52_low.is_none()
            && self.portfolio_id.is_none()
    }
}

/// Scope for listing trades: everything, or one portfolio addressed by
/// canonical id or by display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TradeFilter {
    All,
    PortfolioId(i64),
    PortfolioName(String),
}
