//! Tests for trade domain models, above all the "derived fields are never
//! submitted" invariant.

use rust_decimal_macros::dec;
use serde_json::Value;

use crate::trades::{normalize_symbol, NewTrade, Trade, TradeUpdate};

/// Backend-computed fields; none of these may ever appear in an outbound
/// payload.
const DERIVED_FIELDS: [&str; 7] = [
    "total_buy_value",
    "total_sell_value",
    "balance_qty",
    "acquisition_cost",
    "percent_holding",
    "current_value",
    "realised_profit_loss",
];

fn fully_populated_new_trade() -> NewTrade {
    NewTrade {
        symbol: "AAPL".to_string(),
        total_buy_qty: Some(10),
        buy_price: Some(dec!(150.5)),
        total_sell_qty: Some(2),
        sell_price: Some(dec!(180.0)),
        wk_52_high: Some(dec!(199.62)),
        wk_52_low: Some(dec!(124.17)),
        portfolio_id: Some(7),
    }
}

// ==================== Payload invariants ====================

#[test]
fn test_new_trade_payload_never_contains_derived_fields() {
    let payload = serde_json::to_value(fully_populated_new_trade()).unwrap();
    let object = payload.as_object().unwrap();
    for field in DERIVED_FIELDS {
        assert!(
            !object.contains_key(field),
            "derived field '{}' leaked into create payload",
            field
        );
    }
}

#[test]
fn test_trade_update_payload_never_contains_derived_fields() {
    let update = TradeUpdate {
        symbol: Some("AAPL".to_string()),
        total_buy_qty: Some(10),
        buy_price: Some(dec!(150.5)),
        total_sell_qty: Some(2),
        sell_price: Some(dec!(180.0)),
        wk_52_high: Some(dec!(199.62)),
        wk_52_low: Some(dec!(124.17)),
        portfolio_id: Some(7),
    };
    let payload = serde_json::to_value(update).unwrap();
    let object = payload.as_object().unwrap();
    for field in DERIVED_FIELDS {
        assert!(
            !object.contains_key(field),
            "derived field '{}' leaked into update payload",
            field
        );
    }
}

#[test]
fn test_unpopulated_fields_are_omitted_from_payloads() {
    let new_trade = NewTrade {
        symbol: "AAPL".to_string(),
        total_buy_qty: Some(10),
        buy_price: Some(dec!(150.5)),
        ..Default::default()
    };
    let payload = serde_json::to_value(new_trade).unwrap();
    let object = payload.as_object().unwrap();
    assert_eq!(object.len(), 3);
    assert!(object.contains_key("symbol"));
    assert!(object.contains_key("total_buy_qty"));
    assert!(object.contains_key("buy_price"));
}

#[test]
fn test_empty_update_serializes_to_empty_object() {
    let payload = serde_json::to_value(TradeUpdate::default()).unwrap();
    assert_eq!(payload, Value::Object(Default::default()));
    assert!(TradeUpdate::default().is_empty());
}

#[test]
fn test_prices_serialize_as_json_numbers() {
    let payload = serde_json::to_value(fully_populated_new_trade()).unwrap();
    assert_eq!(payload["total_buy_qty"], Value::from(10));
    assert_eq!(payload["buy_price"], Value::from(150.5));
}

// ==================== Symbol normalization ====================

#[test]
fn test_normalize_symbol_trims_and_uppercases() {
    assert_eq!(normalize_symbol("  aapl "), "AAPL");
    assert_eq!(normalize_symbol("Brk.B"), "BRK.B");
    assert_eq!(normalize_symbol("MSFT"), "MSFT");
}

// ==================== Validation ====================

#[test]
fn test_new_trade_rejects_blank_symbol() {
    let new_trade = NewTrade {
        symbol: "  ".to_string(),
        ..Default::default()
    };
    assert!(new_trade.validate().is_err());
}

#[test]
fn test_new_trade_rejects_negative_quantity() {
    let new_trade = NewTrade {
        symbol: "AAPL".to_string(),
        total_buy_qty: Some(-1),
        ..Default::default()
    };
    assert!(new_trade.validate().is_err());
}

#[test]
fn test_update_rejects_blank_symbol_but_allows_absent() {
    let update = TradeUpdate {
        symbol: Some(" ".to_string()),
        ..Default::default()
    };
    assert!(update.validate().is_err());
    let update = TradeUpdate {
        buy_price: Some(dec!(12.5)),
        ..Default::default()
    };
    assert!(update.validate().is_ok());
}

// ==================== Wire tolerance ====================

#[test]
fn test_trade_parses_portfolio_alias_keys() {
    let trade: Trade = serde_json::from_str(
        r#"{"id":1,"symbol":"AAPL","portfolio":7,"current_portfolio":"Retirement"}"#,
    )
    .unwrap();
    assert_eq!(trade.portfolio_id, Some(7));
    assert_eq!(trade.portfolio_name.as_deref(), Some("Retirement"));
}

#[test]
fn test_trade_parses_derived_fields_read_only() {
    let trade: Trade = serde_json::from_str(
        r#"{
            "id": 1,
            "symbol": "AAPL",
            "total_buy_qty": 10,
            "buy_price": 150.5,
            "total_buy_value": 1505.0,
            "balance_qty": 8,
            "percent_holding": 12.5,
            "realised_profit_loss": 59.0
        }"#,
    )
    .unwrap();
    assert_eq!(trade.total_buy_value, Some(dec!(1505.0)));
    assert_eq!(trade.balance_qty, Some(8));
    assert_eq!(trade.realised_profit_loss, Some(dec!(59.0)));
}
