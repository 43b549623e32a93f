use std::sync::Arc;

use log::debug;
use serde_json::json;

use stockfolio_connect::{fallback, ApiClient, Enveloped, ListEnvelope, Method};

use super::portfolios_constants::{
    portfolio_by_name_path, portfolio_delete_by_name_path, portfolio_path, PORTFOLIOS_PATH,
};
use super::portfolios_model::{NewPortfolio, Portfolio, PortfolioUpdate};
use super::portfolios_traits::PortfolioServiceTrait;
use crate::errors::Result;

/// Service for managing portfolios on the remote backend.
///
/// Thin pass-through: input validation and endpoint addressing only; every
/// derived figure is computed server-side.
pub struct PortfolioService {
    client: Arc<ApiClient>,
}

impl PortfolioService {
    /// Creates a new PortfolioService instance.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl PortfolioServiceTrait for PortfolioService {
    async fn list_portfolios(&self) -> Result<Vec<Portfolio>> {
        debug!("Listing portfolios...");
        let envelope: ListEnvelope<Portfolio> = self.client.get(PORTFOLIOS_PATH).await?;
        Ok(envelope.data)
    }

    async fn get_portfolio(&self, id: i64) -> Result<Portfolio> {
        let portfolio: Enveloped<Portfolio> = self.client.get(&portfolio_path(id)).await?;
        Ok(portfolio.into_inner())
    }

    async fn get_portfolio_by_name(&self, name: &str) -> Result<Portfolio> {
        let portfolio: Enveloped<Portfolio> =
            self.client.get(&portfolio_by_name_path(name)).await?;
        Ok(portfolio.into_inner())
    }

    async fn create_portfolio(&self, new_portfolio: NewPortfolio) -> Result<Portfolio> {
        new_portfolio.validate()?;
        debug!("Creating portfolio '{}'...", new_portfolio.name.trim());
        let payload = json!({ "name": new_portfolio.name.trim() });
        let created: Enveloped<Portfolio> = self.client.post(PORTFOLIOS_PATH, &payload).await?;
        Ok(created.into_inner())
    }

    async fn rename_portfolio(&self, id: i64, update: PortfolioUpdate) -> Result<Portfolio> {
        update.validate()?;
        let payload = json!({ "name": update.name.trim() });
        let updated: Enveloped<Portfolio> =
            self.client.patch(&portfolio_path(id), &payload).await?;
        Ok(updated.into_inner())
    }

    async fn delete_portfolio(&self, id: i64) -> Result<()> {
        debug!("Deleting portfolio {}...", id);
        self.client
            .delete::<serde_json::Value>(&portfolio_path(id))
            .await?;
        Ok(())
    }

    async fn delete_portfolio_by_name(&self, name: &str) -> Result<()> {
        debug!("Deleting portfolio '{}' by name...", name);
        // The name-based delete route has shifted between backend builds;
        // 404 on one candidate means "try the next", anything else aborts.
        let candidates = [
            portfolio_delete_by_name_path(name),
            portfolio_by_name_path(name),
        ];
        fallback::request_with_fallback::<serde_json::Value>(
            &self.client,
            Method::DELETE,
            &candidates,
            None,
        )
        .await?;
        Ok(())
    }
}
