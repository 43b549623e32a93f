//! Portfolio service trait.
//!
//! The backend owns portfolio persistence; the service contract below is
//! the complete set of portfolio operations the client can perform.

use async_trait::async_trait;

use super::portfolios_model::{NewPortfolio, Portfolio, PortfolioUpdate};
use crate::errors::Result;

/// Contract for portfolio operations against the remote backend.
///
/// The canonical identifier is the server-assigned id; the `_by_name`
/// operations are an addressing mode layered on top for callers that only
/// hold a display name.
#[async_trait]
pub trait PortfolioServiceTrait: Send + Sync {
    /// Lists all portfolios.
    async fn list_portfolios(&self) -> Result<Vec<Portfolio>>;

    /// Retrieves a portfolio by its id.
    async fn get_portfolio(&self, id: i64) -> Result<Portfolio>;

    /// Retrieves a portfolio by display name.
    async fn get_portfolio_by_name(&self, name: &str) -> Result<Portfolio>;

    /// Creates a new portfolio with input validation.
    async fn create_portfolio(&self, new_portfolio: NewPortfolio) -> Result<Portfolio>;

    /// Renames a portfolio in place.
    async fn rename_portfolio(&self, id: i64, update: PortfolioUpdate) -> Result<Portfolio>;

    /// Deletes a portfolio by id. The backend cascades trade dissociation.
    async fn delete_portfolio(&self, id: i64) -> Result<()>;

    /// Deletes a portfolio by display name.
    async fn delete_portfolio_by_name(&self, name: &str) -> Result<()>;
}
