//! Trade edit form.
//!
//! The form holds raw string buffers exactly as typed; `parse_new` /
//! `parse_update` turn them into the typed submission payloads or a
//! validation error naming the offending field. Empty buffers are simply
//! omitted from the payload.

use std::str::FromStr;

use rust_decimal::Decimal;

use stockfolio_core::errors::{Error, Result, ValidationError};
use stockfolio_core::trades::{NewTrade, TradeUpdate};

/// String edit buffers for the editable subset of a trade.
#[derive(Debug, Clone, Default)]
pub struct TradeForm {
    pub symbol: String,
    pub total_buy_qty: String,
    pub buy_price: String,
    pub total_sell_qty: String,
    pub sell_price: String,
    pub wk_52_high: String,
    pub wk_52_low: String,
}

impl TradeForm {
    /// Parses the buffers into a create payload. The portfolio association
    /// is the canonical id of whatever portfolio the caller has selected.
    pub fn parse_new(&self, portfolio_id: Option<i64>) -> Result<NewTrade> {
        Ok(NewTrade {
            symbol: self.symbol.trim().to_string(),
            total_buy_qty: parse_quantity("total_buy_qty", &self.total_buy_qty)?,
            buy_price: parse_price("buy_price", &self.buy_price)?,
            total_sell_qty: parse_quantity("total_sell_qty", &self.total_sell_qty)?,
            sell_price: parse_price("sell_price", &self.sell_price)?,
            wk_52_high: parse_price("wk_52_high", &self.wk_52_high)?,
            wk_52_low: parse_price("wk_52_low", &self.wk_52_low)?,
            portfolio_id,
        })
    }

    /// Parses the buffers into a partial-update payload; blank buffers
    /// leave the corresponding field untouched.
    pub fn parse_update(&self) -> Result<TradeUpdate> {
        let symbol = self.symbol.trim();
        Ok(TradeUpdate {
            symbol: (!symbol.is_empty()).then(|| symbol.to_string()),
            total_buy_qty: parse_quantity("total_buy_qty", &self.total_buy_qty)?,
            buy_price: parse_price("buy_price", &self.buy_price)?,
            total_sell_qty: parse_quantity("total_sell_qty", &self.total_sell_qty)?,
            sell_price: parse_price("sell_price", &self.sell_price)?,
            wk_52_high: parse_price("wk_52_high", &self.wk_52_high)?,
            wk_52_low: parse_price("wk_52_low", &self.wk_52_low)?,
            portfolio_id: None,
        })
    }
}

fn parse_quantity(field: &'static str, raw: &str) -> Result<Option<i64>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<i64>().map(Some).map_err(|err| {
        Error::Validation(ValidationError::InvalidInput(format!("{}: {}", field, err)))
    })
}

fn parse_price(field: &'static str, raw: &str) -> Result<Option<Decimal>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    Decimal::from_str(raw).map(Some).map_err(|err| {
        Error::Validation(ValidationError::InvalidInput(format!("{}: {}", field, err)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_new_typed_scenario() {
        let form = TradeForm {
            symbol: "aapl ".to_string(),
            total_buy_qty: "10".to_string(),
            buy_price: "150.5".to_string(),
            ..Default::default()
        };
        let new_trade = form.parse_new(Some(7)).unwrap();
        assert_eq!(new_trade.total_buy_qty, Some(10));
        assert_eq!(new_trade.buy_price, Some(dec!(150.5)));
        assert_eq!(new_trade.portfolio_id, Some(7));

        // Blank buffers never reach the payload.
        let payload = serde_json::to_value(&new_trade).unwrap();
        let object = payload.as_object().unwrap();
        assert!(!object.contains_key("sell_price"));
        assert!(!object.contains_key("wk_52_high"));
    }

    #[test]
    fn test_parse_errors_name_the_field() {
        let form = TradeForm {
            symbol: "AAPL".to_string(),
            total_buy_qty: "ten".to_string(),
            ..Default::default()
        };
        let err = form.parse_new(None).unwrap_err();
        assert!(err.to_string().contains("total_buy_qty"));

        let form = TradeForm {
            symbol: "AAPL".to_string(),
            buy_price: "1.2.3".to_string(),
            ..Default::default()
        };
        let err = form.parse_new(None).unwrap_err();
        assert!(err.to_string().contains("buy_price"));
    }

    #[test]
    fn test_parse_update_skips_blank_symbol() {
        let form = TradeForm {
            sell_price: "180".to_string(),
            ..Default::default()
        };
        let update = form.parse_update().unwrap();
        assert!(update.symbol.is_none());
        assert_eq!(update.sell_price, Some(dec!(180)));
    }
}
