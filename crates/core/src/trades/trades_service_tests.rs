//! Service tests for trades against a mocked backend.

use std::sync::Arc;

use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use stockfolio_connect::{ApiClient, ApiError, AuthScheme};

use crate::errors::Error;
use crate::trades::{NewTrade, TradeFilter, TradeService, TradeServiceTrait, TradeUpdate};

async fn service_against(server: &MockServer) -> TradeService {
    let client = Arc::new(ApiClient::new(&server.uri(), AuthScheme::Token).unwrap());
    TradeService::new(client)
}

// ==================== Listing ====================

#[tokio::test]
async fn test_list_all_trades() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stocks/trades/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "data": [{"id": 1, "symbol": "AAPL", "portfolio": 7}],
        })))
        .mount(&server)
        .await;

    let service = service_against(&server).await;
    let trades = service.list_trades(&TradeFilter::All).await.unwrap();
    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].symbol, "AAPL");
}

#[tokio::test]
async fn test_list_by_portfolio_id_falls_back_to_legacy_filter_key() {
    let server = MockServer::start().await;
    // Canonical key is dead on this build...
    Mock::given(method("GET"))
        .and(path("/api/stocks/trades/"))
        .and(query_param("portfolio_id", "7"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    // ...so the resolver moves on to the legacy key.
    Mock::given(method("GET"))
        .and(path("/api/stocks/trades/"))
        .and(query_param("portfolio", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": 2, "symbol": "MSFT", "portfolio": 7}],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_against(&server).await;
    let trades = service
        .list_trades(&TradeFilter::PortfolioId(7))
        .await
        .unwrap();
    assert_eq!(trades[0].symbol, "MSFT");
}

#[tokio::test]
async fn test_list_by_portfolio_name_uses_name_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stocks/trades/"))
        .and(query_param("portfolio", "Retirement"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_against(&server).await;
    let trades = service
        .list_trades(&TradeFilter::PortfolioName("Retirement".to_string()))
        .await
        .unwrap();
    assert!(trades.is_empty());
}

// ==================== Create / Update ====================

#[tokio::test]
async fn test_create_trade_submits_normalized_editable_subset() {
    let server = MockServer::start().await;
    let expected = json!({
        "symbol": "AAPL",
        "total_buy_qty": 10,
        "buy_price": 150.5,
        "portfolio_id": 7,
    });
    Mock::given(method("POST"))
        .and(path("/api/stocks/trades/"))
        .and(body_json(expected))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "message": "created",
            "data": {"id": 11, "symbol": "AAPL", "portfolio": 7},
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_against(&server).await;
    let trade = service
        .create_trade(NewTrade {
            symbol: " aapl ".to_string(),
            total_buy_qty: Some(10),
            buy_price: Some(dec!(150.5)),
            portfolio_id: Some(7),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(trade.id, 11);
}

#[tokio::test]
async fn test_update_trade_patches_only_populated_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/stocks/trades/11/"))
        .and(body_json(json!({"sell_price": 180.0})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 11, "symbol": "AAPL", "sell_price": 180.0,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_against(&server).await;
    let trade = service
        .update_trade(
            11,
            TradeUpdate {
                sell_price: Some(dec!(180.0)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(trade.sell_price, Some(dec!(180.0)));
}

#[tokio::test]
async fn test_update_trade_rejects_empty_patch() {
    let server = MockServer::start().await;
    let service = service_against(&server).await;
    let err = service
        .update_trade(11, TradeUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

// ==================== Lookup / Delete ====================

#[tokio::test]
async fn test_get_by_symbol_normalizes_before_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stocks/trades/by_symbol/"))
        .and(query_param("symbol", "AAPL"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": 1, "symbol": "AAPL"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let service = service_against(&server).await;
    let trade = service.get_trade_by_symbol(" aapl ").await.unwrap();
    assert_eq!(trade.symbol, "AAPL");
}

#[tokio::test]
async fn test_delete_trade_tolerates_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/stocks/trades/11/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_against(&server).await;
    service.delete_trade(11).await.unwrap();
}

#[tokio::test]
async fn test_non_404_failure_aborts_portfolio_id_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stocks/trades/"))
        .and(query_param("portfolio_id", "7"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "boom"})))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_against(&server).await;
    let err = service
        .list_trades(&TradeFilter::PortfolioId(7))
        .await
        .unwrap_err();
    match err {
        Error::Api(ApiError::Attempted { attempted, .. }) => {
            assert_eq!(attempted.len(), 1);
            assert!(attempted[0].contains("portfolio_id=7"));
        }
        other => panic!("expected annotated API error, got {:?}", other),
    }
}
