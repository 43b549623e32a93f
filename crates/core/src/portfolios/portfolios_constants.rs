/// Collection endpoint for portfolios.
pub const PORTFOLIOS_PATH: &str = "/api/stocks/portfolios/";

/// Path for one portfolio by id.
pub fn portfolio_path(id: i64) -> String {
    format!("{}{}/", PORTFOLIOS_PATH, id)
}

/// Custom-action path for name-based lookup.
pub fn portfolio_by_name_path(name: &str) -> String {
    format!("{}by_name/?name={}", PORTFOLIOS_PATH, urlencoding::encode(name))
}

/// Custom-action path for name-based deletion.
pub fn portfolio_delete_by_name_path(name: &str) -> String {
    format!(
        "{}delete_by_name/?name={}",
        PORTFOLIOS_PATH,
        urlencoding::encode(name)
    )
}
