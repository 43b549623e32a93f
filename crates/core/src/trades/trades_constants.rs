/// Collection endpoint for trades.
pub const TRADES_PATH: &str = "/api/stocks/trades/";

/// Path for one trade by id.
pub fn trade_path(id: i64) -> String {
    format!("{}{}/", TRADES_PATH, id)
}

/// Custom-action path for symbol-based lookup.
pub fn trade_by_symbol_path(symbol: &str) -> String {
    format!("{}by_symbol/?symbol={}", TRADES_PATH, urlencoding::encode(symbol))
}

/// Candidate list paths for filtering by portfolio id. The filter query
/// key has shifted between backend builds; candidates are tried in order.
pub fn trades_by_portfolio_id_candidates(id: i64) -> Vec<String> {
    vec![
        format!("{}?portfolio_id={}", TRADES_PATH, id),
        format!("{}?portfolio={}", TRADES_PATH, id),
    ]
}

/// List path filtered by portfolio display name.
pub fn trades_by_portfolio_name_path(name: &str) -> String {
    format!("{}?portfolio={}", TRADES_PATH, urlencoding::encode(name))
}
