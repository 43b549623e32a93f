//! Dashboard view model.
//!
//! Drives the portfolio and trade services, owning only transient state:
//! the fetched lists, the selected portfolio, the expanded symbol detail,
//! and the view's state machine. Every mutation re-fetches the affected
//! lists so backend-computed figures are always current; there is no
//! optimistic update and no local recomputation of derived values.

use std::collections::BTreeMap;
use std::sync::Arc;

use log::warn;

use stockfolio_core::errors::Result;
use stockfolio_core::portfolios::{NewPortfolio, Portfolio, PortfolioServiceTrait, PortfolioUpdate};
use stockfolio_core::trades::{Trade, TradeFilter, TradeServiceTrait};

use super::forms::TradeForm;
use super::state::ViewState;

pub struct DashboardView {
    portfolio_service: Arc<dyn PortfolioServiceTrait>,
    trade_service: Arc<dyn TradeServiceTrait>,
    portfolios: Vec<Portfolio>,
    selected: Option<Portfolio>,
    trades: Vec<Trade>,
    expanded: Option<Trade>,
    state: ViewState,
}

impl DashboardView {
    pub fn new(
        portfolio_service: Arc<dyn PortfolioServiceTrait>,
        trade_service: Arc<dyn TradeServiceTrait>,
    ) -> Self {
        Self {
            portfolio_service,
            trade_service,
            portfolios: Vec::new(),
            selected: None,
            trades: Vec::new(),
            expanded: None,
            state: ViewState::Idle,
        }
    }

    // ──────────────────────────────────────────────────────────────────
    // Read accessors
    // ──────────────────────────────────────────────────────────────────

    pub fn portfolios(&self) -> &[Portfolio] {
        &self.portfolios
    }

    pub fn selected(&self) -> Option<&Portfolio> {
        self.selected.as_ref()
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn expanded(&self) -> Option<&Trade> {
        self.expanded.as_ref()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }

    /// Grouped-by-portfolio projection: a derived view recomputed per
    /// call, never stored.
    pub fn grouped_trades(&self) -> BTreeMap<String, Vec<&Trade>> {
        let mut grouped: BTreeMap<String, Vec<&Trade>> = BTreeMap::new();
        for trade in &self.trades {
            let group = trade
                .portfolio_name
                .clone()
                .or_else(|| {
                    trade.portfolio_id.and_then(|id| {
                        self.portfolios
                            .iter()
                            .find(|portfolio| portfolio.id == id)
                            .map(|portfolio| portfolio.name.clone())
                    })
                })
                .unwrap_or_else(|| "Uncategorized".to_string());
            grouped.entry(group).or_default().push(trade);
        }
        grouped
    }

    // ──────────────────────────────────────────────────────────────────
    // Actions
    // ──────────────────────────────────────────────────────────────────

    /// Cold load: fetch portfolios, auto-select the first when nothing is
    /// selected yet, fetch the trades for the resulting scope.
    pub async fn refresh(&mut self) {
        if !self.begin(ViewState::Loading) {
            return;
        }
        let result = self.load_initial().await;
        self.finish(result);
    }

    pub async fn select_portfolio(&mut self, id: i64) {
        if !self.begin(ViewState::Loading) {
            return;
        }
        let result = self.select_portfolio_inner(id).await;
        self.finish(result);
    }

    /// Back to the all-portfolios scope.
    pub async fn clear_selection(&mut self) {
        if !self.begin(ViewState::Loading) {
            return;
        }
        self.selected = None;
        let result = self.reload_trades().await;
        self.finish(result);
    }

    pub async fn create_portfolio(&mut self, name: &str) {
        if !self.begin(ViewState::Saving) {
            return;
        }
        let result = self.create_portfolio_inner(name).await;
        self.finish(result);
    }

    pub async fn rename_portfolio(&mut self, id: i64, name: &str) {
        if !self.begin(ViewState::Saving) {
            return;
        }
        let result = self.rename_portfolio_inner(id, name).await;
        self.finish(result);
    }

    pub async fn delete_portfolio(&mut self, id: i64) {
        if !self.begin(ViewState::Saving) {
            return;
        }
        let result = self.delete_portfolio_inner(id).await;
        self.finish(result);
    }

    /// Creates a trade from the form, or partially updates `trade_id`.
    pub async fn save_trade(&mut self, trade_id: Option<i64>, form: &TradeForm) {
        if !self.begin(ViewState::Saving) {
            return;
        }
        let result = self.save_trade_inner(trade_id, form).await;
        self.finish(result);
    }

    pub async fn delete_trade(&mut self, id: i64) {
        if !self.begin(ViewState::Saving) {
            return;
        }
        let result = self.delete_trade_inner(id).await;
        self.finish(result);
    }

    /// Expands the aggregated detail for one symbol.
    pub async fn view_symbol(&mut self, symbol: &str) {
        if !self.begin(ViewState::Loading) {
            return;
        }
        let result = match self.trade_service.get_trade_by_symbol(symbol).await {
            Ok(trade) => {
                self.expanded = Some(trade);
                Ok(())
            }
            Err(err) => Err(err),
        };
        self.finish(result);
    }

    pub fn close_detail(&mut self) {
        self.expanded = None;
    }

    /// Acknowledges the displayed error, returning the view to idle.
    pub fn dismiss_error(&mut self) {
        if matches!(self.state, ViewState::Error(_)) {
            self.state = ViewState::Idle;
        }
    }

    // ──────────────────────────────────────────────────────────────────
    // Internals
    // ──────────────────────────────────────────────────────────────────

    fn begin(&mut self, next: ViewState) -> bool {
        if self.state.is_busy() {
            warn!("Ignoring action: an operation is already in flight");
            return false;
        }
        self.state = next;
        true
    }

    fn finish(&mut self, result: Result<()>) {
        self.state = match result {
            Ok(()) => ViewState::Idle,
            Err(err) => ViewState::Error(err.to_string()),
        };
    }

    fn filter(&self) -> TradeFilter {
        match &self.selected {
            Some(portfolio) => TradeFilter::PortfolioId(portfolio.id),
            None => TradeFilter::All,
        }
    }

    async fn load_initial(&mut self) -> Result<()> {
        let portfolios = self.portfolio_service.list_portfolios().await?;
        match self.selected.take() {
            Some(previous) => {
                self.selected = portfolios
                    .iter()
                    .find(|portfolio| portfolio.id == previous.id)
                    .cloned();
            }
            None => self.selected = portfolios.first().cloned(),
        }
        self.portfolios = portfolios;
        self.reload_trades().await
    }

    /// Post-mutation reload: refresh both lists, keep the selection if it
    /// still exists, never auto-select.
    async fn reload(&mut self) -> Result<()> {
        let portfolios = self.portfolio_service.list_portfolios().await?;
        self.selected = self.selected.take().and_then(|previous| {
            portfolios
                .iter()
                .find(|portfolio| portfolio.id == previous.id)
                .cloned()
        });
        self.portfolios = portfolios;
        self.reload_trades().await
    }

    async fn reload_trades(&mut self) -> Result<()> {
        self.trades = self.trade_service.list_trades(&self.filter()).await?;
        Ok(())
    }

    async fn select_portfolio_inner(&mut self, id: i64) -> Result<()> {
        match self
            .portfolios
            .iter()
            .find(|portfolio| portfolio.id == id)
            .cloned()
        {
            Some(portfolio) => self.selected = Some(portfolio),
            None => self.selected = Some(self.portfolio_service.get_portfolio(id).await?),
        }
        self.reload_trades().await
    }

    async fn create_portfolio_inner(&mut self, name: &str) -> Result<()> {
        let created = self
            .portfolio_service
            .create_portfolio(NewPortfolio {
                name: name.to_string(),
            })
            .await?;
        // A freshly created portfolio becomes the selection.
        self.selected = Some(created);
        self.reload().await
    }

    async fn rename_portfolio_inner(&mut self, id: i64, name: &str) -> Result<()> {
        self.portfolio_service
            .rename_portfolio(
                id,
                PortfolioUpdate {
                    name: name.to_string(),
                },
            )
            .await?;
        self.reload().await
    }

    async fn delete_portfolio_inner(&mut self, id: i64) -> Result<()> {
        self.portfolio_service.delete_portfolio(id).await?;
        self.portfolios = self.portfolio_service.list_portfolios().await?;
        if self.selected.as_ref().is_some_and(|p| p.id == id) {
            // Deleting the selected portfolio clears the selection and the
            // trade list it was scoping.
            self.selected = None;
            self.trades.clear();
        }
        self.reload_trades().await
    }

    async fn save_trade_inner(&mut self, trade_id: Option<i64>, form: &TradeForm) -> Result<()> {
        match trade_id {
            None => {
                let new_trade = form.parse_new(self.selected.as_ref().map(|p| p.id))?;
                self.trade_service.create_trade(new_trade).await?;
            }
            Some(id) => {
                let update = form.parse_update()?;
                self.trade_service.update_trade(id, update).await?;
            }
        }
        self.reload().await
    }

    async fn delete_trade_inner(&mut self, id: i64) -> Result<()> {
        self.trade_service.delete_trade(id).await?;
        self.reload().await
    }
}
